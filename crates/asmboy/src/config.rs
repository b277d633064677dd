use asmboy_common::Word;
use typed_builder::TypedBuilder;

/// Character code that ends a stream read (`LDN`, exhausted `STDIN`).
pub const NULL_TERM: Word = 0;

/// Register names available when none are configured.
pub const DEFAULT_REGISTERS: [&str; 4] = ["A", "B", "C", "D"];

/// Reserved memory labels of the stream devices.
pub const STDOUT: &str = "STDOUT";
pub const STDERR: &str = "STDERR";
pub const STDIN: &str = "STDIN";

#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct Config {
    #[builder(default = NULL_TERM)]
    pub null_term: Word,
    #[builder(default = DEFAULT_REGISTERS.iter().map(|r| r.to_string()).collect())]
    pub registers: Vec<String>,
    /// Abort `Machine::run` once the clock passes this many cycles.
    #[builder(default, setter(strip_option))]
    pub cycle_limit: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = Config::default();
        assert_eq!(config.null_term, NULL_TERM);
        assert_eq!(config.registers, vec!["A", "B", "C", "D"]);
        assert_eq!(config.cycle_limit, None);
    }

    #[test]
    fn builder_overrides() {
        let config = Config::builder()
            .null_term(10)
            .registers(vec!["X".to_string()])
            .cycle_limit(64)
            .build();
        assert_eq!(config.null_term, 10);
        assert_eq!(config.registers, vec!["X"]);
        assert_eq!(config.cycle_limit, Some(64));
    }
}
