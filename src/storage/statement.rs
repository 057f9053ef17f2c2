use crate::schema::Value;

/// SQL text with numbered placeholders and the values bound to them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Register a parameter and return its `?N` placeholder.
    pub fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        format!("?{}", self.params.len())
    }

    pub fn push_sql(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_numbers_placeholders_in_order() {
        let mut stmt = Statement::new("SELECT * FROM t WHERE a = ");
        let a = stmt.bind(Value::Integer(1));
        stmt.push_sql(&a);
        stmt.push_sql(" AND b = ");
        let b = stmt.bind(Value::Text("x".into()));
        stmt.push_sql(&b);
        assert_eq!(stmt.sql, "SELECT * FROM t WHERE a = ?1 AND b = ?2");
        assert_eq!(stmt.params, vec![Value::Integer(1), Value::Text("x".into())]);
    }
}
