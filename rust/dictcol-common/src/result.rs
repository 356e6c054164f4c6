pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_config {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_config(result, stringify!($name), stringify!($expr))?;
    }};
}

#[macro_export]
macro_rules! verify_data {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_data(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_config(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_config(name, condition)
    }
}

#[inline]
pub fn verify_data(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_format(name, condition)
    }
}

#[cold]
pub fn invalid_config(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidConfig {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
pub fn invalid_format(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidFormat {
        element: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    fn check_workers(worker_count: usize) -> super::Result<usize> {
        verify_config!(worker_count, worker_count >= 1);
        Ok(worker_count)
    }

    fn check_id(id: u32, len: usize) -> super::Result<u32> {
        verify_data!(id, (id as usize) < len);
        Ok(id)
    }

    #[test]
    fn test_verify_macros() {
        assert_eq!(check_workers(3).unwrap(), 3);
        let err = check_workers(0).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidConfig { name, message } => {
                assert_eq!(name, "worker_count");
                assert_eq!(message, "worker_count >= 1");
            }
            other => panic!("unexpected error {other:?}"),
        }

        assert_eq!(check_id(1, 2).unwrap(), 1);
        assert!(matches!(
            check_id(2, 2).unwrap_err().kind(),
            ErrorKind::InvalidFormat { .. }
        ));
    }
}
