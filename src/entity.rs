//! Static descriptors for the three resource tables: table name, path segment, writable
//! columns and to-one name projections. The SQL builder and request validation only ever
//! take identifiers from here.

/// Storage class of a column; drives DDL, JSON type checks and parameter binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Real,
    Text,
}

impl ColumnKind {
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Real => "REAL",
            ColumnKind::Text => "TEXT",
        }
    }

    /// Human name used in validation messages.
    pub fn describe(self) -> &'static str {
        match self {
            ColumnKind::Integer => "an integer",
            ColumnKind::Real => "a number",
            ColumnKind::Text => "a string",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnInfo {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Table this column points at (foreign key, not enforced).
    pub references: Option<&'static str>,
    /// Exposed as an equality filter on the collection endpoint.
    pub filterable: bool,
}

impl ColumnInfo {
    const fn text(name: &'static str) -> Self {
        ColumnInfo {
            name,
            kind: ColumnKind::Text,
            references: None,
            filterable: false,
        }
    }

    const fn integer(name: &'static str) -> Self {
        ColumnInfo {
            kind: ColumnKind::Integer,
            ..ColumnInfo::text(name)
        }
    }

    const fn real(name: &'static str) -> Self {
        ColumnInfo {
            kind: ColumnKind::Real,
            ..ColumnInfo::text(name)
        }
    }

    const fn foreign_key(name: &'static str, table: &'static str) -> Self {
        ColumnInfo {
            kind: ColumnKind::Integer,
            references: Some(table),
            filterable: true,
            ..ColumnInfo::text(name)
        }
    }
}

/// How an update treats keys that are not writable columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnknownFields {
    Ignore,
    Reject,
}

/// Pulls `column` off the row referenced by `our_key` and exposes it as `name`.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub name: &'static str,
    pub our_key: &'static str,
    pub related_table: &'static str,
    pub column: &'static str,
}

#[derive(Debug)]
pub struct EntityDef {
    pub table_name: &'static str,
    pub path_segment: &'static str,
    /// Singular label for messages ("movie", "director").
    pub label: &'static str,
    pub pk_column: &'static str,
    /// Writable columns in wire order. The primary key is never writable.
    pub columns: &'static [ColumnInfo],
    pub projections: &'static [Projection],
    pub unknown_on_update: UnknownFields,
}

impl EntityDef {
    pub fn column(&self, name: &str) -> Option<&'static ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn filterable_columns(&self) -> impl Iterator<Item = &'static ColumnInfo> {
        self.columns.iter().filter(|c| c.filterable)
    }
}

pub const DIRECTOR: EntityDef = EntityDef {
    table_name: "director",
    path_segment: "directors",
    label: "director",
    pk_column: "id",
    columns: &[ColumnInfo::text("name")],
    projections: &[],
    unknown_on_update: UnknownFields::Ignore,
};

pub const GENRE: EntityDef = EntityDef {
    table_name: "genre",
    path_segment: "genres",
    label: "genre",
    pk_column: "id",
    columns: &[ColumnInfo::text("name")],
    projections: &[],
    unknown_on_update: UnknownFields::Ignore,
};

pub const MOVIE: EntityDef = EntityDef {
    table_name: "movie",
    path_segment: "movies",
    label: "movie",
    pk_column: "id",
    columns: &[
        ColumnInfo::text("title"),
        ColumnInfo::text("description"),
        ColumnInfo::text("trailer"),
        ColumnInfo::integer("year"),
        ColumnInfo::real("rating"),
        ColumnInfo::foreign_key("genre_id", "genre"),
        ColumnInfo::foreign_key("director_id", "director"),
    ],
    projections: &[
        Projection {
            name: "director_name",
            our_key: "director_id",
            related_table: "director",
            column: "name",
        },
        Projection {
            name: "genre_name",
            our_key: "genre_id",
            related_table: "genre",
            column: "name",
        },
    ],
    unknown_on_update: UnknownFields::Reject,
};

/// Every table, in creation order (referenced tables first).
pub static ALL: [&EntityDef; 3] = [&DIRECTOR, &GENRE, &MOVIE];
