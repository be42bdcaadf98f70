use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite};

/// Filter value meaning "do not filter on this column".
pub const ALL: &str = "all";

pub const JOB_COLUMNS: &str = "id, title, company, location, description, category, job_type, \
                               salary, posted_date, deadline, approved";

/// Raw `/jobs` query string.
#[derive(Debug, Default, Deserialize)]
pub struct JobsQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub category: Option<String>,
    pub notice: Option<String>,
}

/// Normalized search filter. `None` disables the corresponding predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub search: Option<String>,
    pub job_type: Option<String>,
    pub category: Option<String>,
}

impl JobFilter {
    pub fn new(
        search: Option<String>,
        job_type: Option<String>,
        category: Option<String>,
    ) -> Self {
        JobFilter {
            // Search text is matched as typed, surrounding spaces included.
            search: search.filter(|v| !v.trim().is_empty()),
            job_type: exact(job_type),
            category: exact(category),
        }
    }

    pub fn current_search(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    pub fn current_type(&self) -> &str {
        self.job_type.as_deref().unwrap_or(ALL)
    }

    pub fn current_category(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL)
    }
}

impl From<&JobsQuery> for JobFilter {
    fn from(query: &JobsQuery) -> Self {
        JobFilter::new(
            query.search.clone(),
            query.job_type.clone(),
            query.category.clone(),
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn exact(value: Option<String>) -> Option<String> {
    non_blank(value).filter(|v| !v.eq_ignore_ascii_case(ALL))
}

/// Turns free text into a LIKE pattern matching it as a literal substring.
/// `\` is the escape character declared in the query.
pub fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Builds the public listing query: approved postings only, newest first.
/// Every filter value is bound, never spliced into the SQL text.
pub fn listing_query(filter: &JobFilter) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {JOB_COLUMNS} FROM job_postings WHERE approved = 1"
    ));

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        // SQLite LIKE folds ASCII case.
        qb.push(" AND (title LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR company LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR description LIKE ");
        qb.push_bind(pattern);
        qb.push(" ESCAPE '\\')");
    }

    if let Some(job_type) = &filter.job_type {
        qb.push(" AND job_type = ");
        qb.push_bind(job_type.clone());
    }

    if let Some(category) = &filter.category {
        qb.push(" AND category = ");
        qb.push_bind(category.clone());
    }

    qb.push(" ORDER BY posted_date DESC, id DESC");
    qb
}
