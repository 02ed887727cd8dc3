/// returns name of current function.
macro_rules! fn_name_bare {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.rsplit("::")
            .find(|&part| part != "f" && part != "{{closure}}")
            .unwrap_or(name)
    }};
}

/// returns name of current function plus "()"
macro_rules! fn_name {
    () => {{
        format!("{}()", $crate::macros::fn_name_bare!())
    }};
}

/// logs at debug level if the enclosing scope runs longer than the
/// `LOG_SLOW_SCOPE_THRESHOLD`. See [crate::ScopeDurationLogger]
macro_rules! log_slow_scope {
    ($description: expr) => {
        let log_slow_scope_desc = $description;
        let _scope_logger = $crate::ScopeDurationLogger::new_default_threshold(&log_slow_scope_desc);
    };
}

// These allow the macros to be used as
// use crate::macros::xxxxx;
pub(crate) use fn_name;
pub(crate) use fn_name_bare;
pub(crate) use log_slow_scope;
