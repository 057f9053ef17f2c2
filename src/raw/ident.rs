use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::storage::Order;
use crate::wrapper::Rejection;

/// Plain SQL identifier: letter or underscore, then letters, digits, underscores.
static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("invalid identifier regex"));

/// Keywords SQLite refuses as bare table or column names.
const RESERVED: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "AUTOINCREMENT", "BETWEEN", "CASE", "CHECK", "COLLATE",
    "COMMIT", "CONSTRAINT", "CREATE", "DEFAULT", "DEFERRABLE", "DELETE", "DISTINCT", "DROP",
    "ELSE", "ESCAPE", "EXCEPT", "EXISTS", "FOREIGN", "FROM", "GROUP", "HAVING", "IN", "INDEX",
    "INSERT", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN", "LIMIT", "NOT", "NOTHING", "NOTNULL",
    "NULL", "ON", "OR", "ORDER", "PRIMARY", "REFERENCES", "RETURNING", "SELECT", "SET", "TABLE",
    "THEN", "TO", "TRANSACTION", "UNION", "UNIQUE", "UPDATE", "USING", "VALUES", "WHEN", "WHERE",
];

fn is_reserved(name: &str) -> bool {
    RESERVED.iter().any(|kw| kw.eq_ignore_ascii_case(name))
}

/// A table or column name that is safe to splice into statement text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident(String);

impl Ident {
    pub fn parse(name: &str) -> Result<Self, Rejection> {
        if IDENT_RE.is_match(name) && !is_reserved(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(Rejection::InvalidIdentifier(name.to_string()))
        }
    }

    /// Like [`Ident::parse`], but an empty name is a missing argument.
    pub fn required(name: &str, what: &'static str) -> Result<Self, Rejection> {
        if name.trim().is_empty() {
            return Err(Rejection::MissingArgument(what));
        }
        Self::parse(name)
    }

    pub fn list(names: &[String]) -> Result<Vec<Self>, Rejection> {
        names.iter().map(|n| Self::parse(n)).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn join(idents: &[Ident]) -> String {
    idents
        .iter()
        .map(Ident::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl Operator {
    pub fn as_sql(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Like => "LIKE",
        }
    }
}

impl FromStr for Operator {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim() {
            "" => return Err(Rejection::MissingArgument("operator")),
            "=" | "==" => Operator::Eq,
            "!=" | "<>" => Operator::Ne,
            "<" => Operator::Lt,
            "<=" => Operator::Le,
            ">" => Operator::Gt,
            ">=" => Operator::Ge,
            other if other.eq_ignore_ascii_case("like") => Operator::Like,
            other => return Err(Rejection::UnsupportedOperator(other.to_string())),
        };
        Ok(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Parse a comma separated `"col [ASC|DESC], ..."` list into ORDER BY terms.
pub fn order_terms(order: &str) -> Result<String, Rejection> {
    if order.trim().is_empty() {
        return Err(Rejection::MissingArgument("order"));
    }
    let mut terms = Vec::new();
    for clause in order.split(',') {
        let parsed: Order = clause.parse()?;
        Ident::parse(&parsed.field)?;
        terms.push(parsed.to_string());
    }
    Ok(terms.join(", "))
}
