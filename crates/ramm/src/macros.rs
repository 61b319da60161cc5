/// Checks an operation precondition, logging the error site before aborting.
#[macro_export]
macro_rules! validate {
    ($assert:expr, $err:expr) => {{
        if $assert {
            Ok(())
        } else {
            let error_code: $crate::error::ErrorCode = $err;
            log::error!("Error {} thrown at {}:{}", error_code, file!(), line!());
            Err(error_code)
        }
    }};
    ($assert:expr, $err:expr, $($arg:tt)+) => {{
        if $assert {
            Ok(())
        } else {
            let error_code: $crate::error::ErrorCode = $err;
            log::error!(
                "Error {} thrown at {}:{}: {}",
                error_code,
                file!(),
                line!(),
                format_args!($($arg)+)
            );
            Err(error_code)
        }
    }};
}
