use std::fmt;

/// Команда, которую запускаем при каждом принятом изменении экрана
pub const AUTORANDR_ARGV: [&str; 5] = ["autorandr", "--change", "--force", "--default", "default"];

/// Упорядоченный argv запускаемой команды
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    program: String,
    args: Vec<String>,
}

impl LaunchCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `autorandr --change --force --default default`
    pub fn autorandr() -> Self {
        Self::new(AUTORANDR_ARGV[0], AUTORANDR_ARGV[1..].iter().copied())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for LaunchCommand {
    fn default() -> Self {
        Self::autorandr()
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autorandr_command() {
        let command = LaunchCommand::autorandr();
        assert_eq!(command.program(), "autorandr");
        assert_eq!(command.args(), &["--change", "--force", "--default", "default"]);
        assert_eq!(command.to_string(), "autorandr --change --force --default default");
        assert_eq!(LaunchCommand::default(), command);
    }
}
