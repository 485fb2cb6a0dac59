//! Builds parameterized INSERT, SELECT, UPDATE, DELETE and DDL from an entity descriptor.

use crate::entity::{ColumnInfo, EntityDef};
use crate::sql::BindValue;

const MAIN_ALIAS: &str = "main";

/// Quote identifier (safe: only from descriptors).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn projection_alias(name: &str) -> String {
    quoted(&format!("{}_rel", name))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a param and return its `?N` placeholder.
    fn push_param(&mut self, v: BindValue) -> String {
        self.params.push(v);
        format!("?{}", self.params.len())
    }
}

/// Column list for reads: pk, writable columns, then each projection pulled off its joined row.
fn select_columns(entity: &EntityDef) -> String {
    let main_cols = std::iter::once(entity.pk_column)
        .chain(entity.columns.iter().map(|c| c.name))
        .map(|name| format!("{}.{} AS {}", MAIN_ALIAS, quoted(name), quoted(name)));
    let projected = entity.projections.iter().map(|p| {
        format!(
            "{}.{} AS {}",
            projection_alias(p.name),
            quoted(p.column),
            quoted(p.name)
        )
    });
    main_cols.chain(projected).collect::<Vec<_>>().join(", ")
}

/// Main table plus one LEFT JOIN per projection, so a null or dangling key yields NULL.
fn from_clause(entity: &EntityDef) -> String {
    let mut from = format!("{} AS {}", quoted(entity.table_name), MAIN_ALIAS);
    for p in entity.projections {
        let alias = projection_alias(p.name);
        from.push_str(&format!(
            " LEFT JOIN {} AS {} ON {}.{} = {}.{}",
            quoted(p.related_table),
            alias,
            alias,
            quoted("id"),
            MAIN_ALIAS,
            quoted(p.our_key)
        ));
    }
    from
}

/// SELECT with optional equality filters (AND-combined), ORDER BY pk.
/// Filters on columns the entity does not declare filterable are skipped.
pub fn select_list(entity: &EntityDef, filters: &[(&str, BindValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for (col, val) in filters {
        let Some(c) = entity.column(col).filter(|c| c.filterable) else {
            continue;
        };
        let ph = q.push_param(val.clone());
        where_parts.push(format!("{}.{} = {}", MAIN_ALIAS, quoted(c.name), ph));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}.{}",
        select_columns(entity),
        from_clause(entity),
        where_clause,
        MAIN_ALIAS,
        quoted(entity.pk_column)
    );
    q
}

/// SELECT one row by primary key.
pub fn select_by_id(entity: &EntityDef, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(BindValue::Integer(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {}.{} = {}",
        select_columns(entity),
        from_clause(entity),
        MAIN_ALIAS,
        quoted(entity.pk_column),
        ph
    );
    q
}

/// INSERT the given column values and return the generated primary key.
pub fn insert(entity: &EntityDef, values: &[(&ColumnInfo, BindValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = quoted(entity.table_name);
    let pk = quoted(entity.pk_column);
    if values.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, pk);
        return q;
    }
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (c, v) in values {
        cols.push(quoted(c.name));
        placeholders.push(q.push_param(v.clone()));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table,
        cols.join(", "),
        placeholders.join(", "),
        pk
    );
    q
}

/// UPDATE by id: SET only the given columns. None when there is nothing to set.
pub fn update(
    entity: &EntityDef,
    id: i64,
    values: &[(&ColumnInfo, BindValue)],
) -> Option<QueryBuf> {
    if values.is_empty() {
        return None;
    }
    let mut q = QueryBuf::new();
    let sets: Vec<String> = values
        .iter()
        .map(|(c, v)| format!("{} = {}", quoted(c.name), q.push_param(v.clone())))
        .collect();
    let id_ph = q.push_param(BindValue::Integer(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        quoted(entity.table_name),
        sets.join(", "),
        quoted(entity.pk_column),
        id_ph
    );
    Some(q)
}

/// DELETE by id.
pub fn delete(entity: &EntityDef, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(BindValue::Integer(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {}",
        quoted(entity.table_name),
        quoted(entity.pk_column),
        ph
    );
    q
}

/// CREATE TABLE IF NOT EXISTS, with an index per foreign-key column.
pub fn create_table(entity: &EntityDef) -> Vec<String> {
    let mut col_defs = vec![format!(
        "{} INTEGER PRIMARY KEY AUTOINCREMENT",
        quoted(entity.pk_column)
    )];
    for c in entity.columns {
        let mut def = format!("{} {}", quoted(c.name), c.kind.sql_type());
        if let Some(table) = c.references {
            def.push_str(&format!(" REFERENCES {} ({})", quoted(table), quoted("id")));
        }
        col_defs.push(def);
    }
    let mut stmts = vec![format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(entity.table_name),
        col_defs.join(", ")
    )];
    for c in entity.columns.iter().filter(|c| c.references.is_some()) {
        stmts.push(format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            quoted(&format!("{}_{}_idx", entity.table_name, c.name)),
            quoted(entity.table_name),
            quoted(c.name)
        ));
    }
    stmts
}
