//! Assertion macros shared by the workspace's tests.

use hapi_types::error::{ChainError, ClientError};

/// Asserts that two byte buffers are equal, printing both as base64 on failure.
#[macro_export]
macro_rules! assert_bytes_eq {
    ($left:expr, $right:expr) => {{
        let (left, right) = (&$left, &$right);
        let left: &[u8] = ::core::convert::AsRef::<[u8]>::as_ref(left);
        let right: &[u8] = ::core::convert::AsRef::<[u8]>::as_ref(right);
        if left != right {
            use $crate::__base64::Engine as _;
            panic!(
                "bytes differ\n  left: {}\n right: {}",
                $crate::__base64::engine::general_purpose::STANDARD.encode(left),
                $crate::__base64::engine::general_purpose::STANDARD.encode(right),
            );
        }
    }};
}

/// Asserts that a result is `Ok` and unwraps it.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("Expected Ok, got Err: {:?}", err),
        }
    };
    ($expr:expr, $($arg:tt)+) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("Expected Ok, got Err: {:?} ({})", err, format!($($arg)+)),
        }
    };
}

/// Asserts that a result is `Err` and unwraps the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(val) => panic!("Expected Err, got Ok: {:?}", val),
            Err(err) => err,
        }
    };
    ($expr:expr, $($arg:tt)+) => {
        match $expr {
            Ok(val) => panic!("Expected Err, got Ok: {:?} ({})", val, format!($($arg)+)),
            Err(err) => err,
        }
    };
}

/// Errors that can carry a program rejection reason.
pub trait Rejection {
    /// The reason the program gave, if this error is a rejected submission.
    fn rejection(&self) -> Option<&str>;
}

impl Rejection for ChainError {
    fn rejection(&self) -> Option<&str> {
        match self {
            ChainError::Submission { reason } => Some(reason),
            _ => None,
        }
    }
}

impl Rejection for ClientError {
    fn rejection(&self) -> Option<&str> {
        match self {
            ClientError::Chain(e) => e.rejection(),
            _ => None,
        }
    }
}

/// Asserts that a call was rejected by the program with `reason`.
#[macro_export]
macro_rules! assert_rejected {
    ($expr:expr, $reason:expr) => {
        match $expr {
            Ok(val) => panic!("Expected a rejected submission, got Ok: {:?}", val),
            Err(err) => match $crate::assertions::Rejection::rejection(&err) {
                Some(reason) => assert_eq!(reason, $reason),
                None => panic!("Expected a rejected submission, got {:?}", err),
            },
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macros_pass_through_values() {
        assert_bytes_eq!(vec![1u8, 2], [1u8, 2]);
        assert_bytes_eq!(String::from("ab").into_bytes(), b"ab".to_vec());
        let v: Result<u8, ()> = Ok(3);
        assert_eq!(assert_ok!(v), 3);
        let e: Result<(), &str> = Err("no");
        assert_eq!(assert_err!(e), "no");
        let r: Result<(), ChainError> = Err(ChainError::Submission {
            reason: "Already in use".into(),
        });
        assert_rejected!(r, "Already in use");
    }

    #[test]
    #[should_panic(expected = "bytes differ")]
    fn bytes_mismatch_panics() {
        assert_bytes_eq!([1u8], [2u8]);
    }
}
