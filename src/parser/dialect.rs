//! Lexer dialect selection.

use std::fmt;
use std::str::FromStr;

use sqlparser::dialect::{
    AnsiDialect, Dialect, GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect,
    SQLiteDialect,
};

use crate::error::SqlInspectError;

/// SQL dialect used to lex statements.
///
/// The dialect only affects lexing (identifier quoting, string forms); the
/// analysis itself is dialect-neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlDialect {
    #[default]
    Generic,
    Ansi,
    MsSql,
    Postgres,
    MySql,
    Sqlite,
}

impl SqlDialect {
    /// Names accepted by [`FromStr`].
    pub const NAMES: &'static [&'static str] =
        &["generic", "ansi", "mssql", "postgres", "mysql", "sqlite"];

    /// Instantiate the sqlparser dialect.
    pub fn build(self) -> Box<dyn Dialect> {
        match self {
            SqlDialect::Generic => Box::new(GenericDialect {}),
            SqlDialect::Ansi => Box::new(AnsiDialect {}),
            SqlDialect::MsSql => Box::new(MsSqlDialect {}),
            SqlDialect::Postgres => Box::new(PostgreSqlDialect {}),
            SqlDialect::MySql => Box::new(MySqlDialect {}),
            SqlDialect::Sqlite => Box::new(SQLiteDialect {}),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SqlDialect::Generic => "generic",
            SqlDialect::Ansi => "ansi",
            SqlDialect::MsSql => "mssql",
            SqlDialect::Postgres => "postgres",
            SqlDialect::MySql => "mysql",
            SqlDialect::Sqlite => "sqlite",
        }
    }
}

impl FromStr for SqlDialect {
    type Err = SqlInspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(SqlDialect::Generic),
            "ansi" => Ok(SqlDialect::Ansi),
            "mssql" | "tsql" | "sqlserver" => Ok(SqlDialect::MsSql),
            "postgres" | "postgresql" => Ok(SqlDialect::Postgres),
            "mysql" => Ok(SqlDialect::MySql),
            "sqlite" => Ok(SqlDialect::Sqlite),
            _ => Err(SqlInspectError::UnsupportedDialect {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
