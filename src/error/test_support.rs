use super::{
    AggregateError, ConfigError, DistributedError, ExecError, ReportError, SinkError,
    ValidationError,
};

macro_rules! test_expectations {
    ($($error:ident),+ $(,)?) => {
        $(
            impl From<&'static str> for $error {
                fn from(message: &'static str) -> Self {
                    $error::TestExpectation { message }
                }
            }

            impl From<String> for $error {
                fn from(value: String) -> Self {
                    $error::TestExpectationValue {
                        message: "Test expectation failed",
                        value,
                    }
                }
            }
        )+
    };
}

test_expectations!(
    ValidationError,
    ConfigError,
    ExecError,
    ReportError,
    AggregateError,
    DistributedError,
    SinkError,
);

mod tests {
    use crate::error::{AppError, AppResult};

    #[test]
    fn expectations_keep_their_message() -> AppResult<()> {
        let plain = AppError::sink("rows missing").to_string();
        let detailed = AppError::aggregate(format!("got {}", 3)).to_string();
        if !plain.contains("rows missing") || !detailed.contains("got 3") {
            return Err(AppError::validation(format!(
                "Unexpected messages '{}' / '{}'",
                plain, detailed
            )));
        }
        Ok(())
    }
}
