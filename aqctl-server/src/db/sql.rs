//! SQL text and parameter binding for `mgl.aq`
//!
//! The client-writable column list is declared once. INSERT, UPDATE, the
//! positional binder and the in-memory field copy are all generated from it,
//! so the two write paths always agree on which columns they touch.

use once_cell::sync::Lazy;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

use crate::models::{AqRecord, ListQuery};

/// Table holding AQ records
pub const AQ_TABLE: &str = "mgl.aq";

/// All 21 columns in result order
pub const SELECT_COLUMNS: &str = "aq, signout_name, prog_id, migratory_group, cruise_id, \
     comments, sample_types, trip, trip_location, mgl_lead, mgl_samplers, chief_scientist, \
     target, comments_collection_method, vial_series, comments_vial_series, start_date, \
     end_date, date_added, date_updated, chief_scientist_id";

/// Query returning a full record
pub type RecordQuery<'q> = QueryAs<'q, Postgres, AqRecord, PgArguments>;

macro_rules! writable_columns {
    ($($field:ident),+ $(,)?) => {
        /// Columns a client may set, in binding order ($2, $3, ...).
        pub const WRITABLE_COLUMNS: &[&str] = &[$(stringify!($field)),+];

        /// Bind every client-writable field of `record`, NULL for `None`.
        pub fn bind_writable<'q>(mut query: RecordQuery<'q>, record: &'q AqRecord) -> RecordQuery<'q> {
            $( query = query.bind(&record.$field); )+
            query
        }

        /// Overwrite the client-writable fields of `dst` with those of `src`.
        pub fn copy_writable(dst: &mut AqRecord, src: &AqRecord) {
            $( dst.$field.clone_from(&src.$field); )+
        }
    };
}

writable_columns!(
    signout_name,
    prog_id,
    migratory_group,
    cruise_id,
    comments,
    sample_types,
    trip,
    trip_location,
    mgl_lead,
    mgl_samplers,
    chief_scientist,
    target,
    comments_collection_method,
    vial_series,
    comments_vial_series,
    start_date,
    end_date,
    chief_scientist_id,
);

/// `$1` is the key, writable columns follow from `$2`.
pub static INSERT_SQL: Lazy<String> = Lazy::new(|| {
    let params = (0..WRITABLE_COLUMNS.len())
        .map(|i| format!("${}", i + 2))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {AQ_TABLE} (aq, {}, date_added, date_updated) \
         VALUES ($1, {params}, now(), now()) RETURNING {SELECT_COLUMNS}",
        WRITABLE_COLUMNS.join(", "),
    )
});

/// `date_added` is never part of the SET list.
pub static UPDATE_SQL: Lazy<String> = Lazy::new(|| {
    let assignments = WRITABLE_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = ${}", i + 2))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {AQ_TABLE} SET {assignments}, date_updated = now() \
         WHERE aq = $1 RETURNING {SELECT_COLUMNS}"
    )
});

pub static GET_SQL: Lazy<String> =
    Lazy::new(|| format!("SELECT {SELECT_COLUMNS} FROM {AQ_TABLE} WHERE aq = $1"));

pub static DELETE_SQL: Lazy<String> =
    Lazy::new(|| format!("DELETE FROM {AQ_TABLE} WHERE aq = $1"));

/// Build the list statement. Placeholders shift by one when a filter is present.
pub fn list_sql(query: &ListQuery) -> String {
    let mut sql = format!("SELECT {SELECT_COLUMNS} FROM {AQ_TABLE}");
    let next = if query.filter.is_some() {
        sql.push_str(" WHERE aq ILIKE $1");
        2
    } else {
        1
    };
    sql.push_str(&format!(" ORDER BY aq LIMIT ${} OFFSET ${}", next, next + 1));
    sql
}

/// `%filter%` with LIKE metacharacters escaped, so the filter is literal.
pub fn like_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
