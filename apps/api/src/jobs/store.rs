use sqlx::SqliteConnection;

use crate::errors::AppError;
use crate::forms::{optional, Required};
use crate::jobs::query::{listing_query, JobFilter, JOB_COLUMNS};
use crate::models::job::JobPostingRow;

/// Validated employer submission. Carries no moderation flag: a new posting
/// is always stored pending.
#[derive(Debug, Clone)]
pub struct NewJobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub category: String,
    pub job_type: String,
    pub salary: String,
    pub deadline: String,
}

impl NewJobPosting {
    #[allow(clippy::too_many_arguments)]
    pub fn validate(
        title: Option<String>,
        company: Option<String>,
        location: Option<String>,
        description: Option<String>,
        category: Option<String>,
        job_type: Option<String>,
        salary: Option<String>,
        deadline: Option<String>,
    ) -> Result<Self, AppError> {
        let mut required = Required::new();
        let posting = NewJobPosting {
            title: required.take("title", title),
            company: required.take("company", company),
            location: required.take("location", location),
            description: required.take("description", description),
            category: required.take("category", category),
            job_type: required.take("job_type", job_type),
            salary: optional(salary),
            deadline: optional(deadline),
        };
        required.finish()?;
        Ok(posting)
    }
}

/// Search results plus the values that populate the filter controls.
#[derive(Debug, Default)]
pub struct Listing {
    pub jobs: Vec<JobPostingRow>,
    pub categories: Vec<String>,
    pub job_types: Vec<String>,
}

pub async fn insert_posting(
    conn: &mut SqliteConnection,
    posting: &NewJobPosting,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO job_postings
            (title, company, location, description, category, job_type, salary, deadline, approved)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0)
        "#,
    )
    .bind(&posting.title)
    .bind(&posting.company)
    .bind(&posting.location)
    .bind(&posting.description)
    .bind(&posting.category)
    .bind(&posting.job_type)
    .bind(&posting.salary)
    .bind(&posting.deadline)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Approved postings matching `filter`, together with the distinct
/// categories and job types across every posting, approved or not.
pub async fn search_listing(
    conn: &mut SqliteConnection,
    filter: &JobFilter,
) -> Result<Listing, sqlx::Error> {
    let jobs = listing_query(filter)
        .build_query_as::<JobPostingRow>()
        .fetch_all(&mut *conn)
        .await?;

    let categories: Vec<String> =
        sqlx::query_scalar("SELECT DISTINCT category FROM job_postings ORDER BY category")
            .fetch_all(&mut *conn)
            .await?;

    let job_types: Vec<String> =
        sqlx::query_scalar("SELECT DISTINCT job_type FROM job_postings ORDER BY job_type")
            .fetch_all(&mut *conn)
            .await?;

    Ok(Listing {
        jobs,
        categories,
        job_types,
    })
}

/// Postings awaiting moderation, oldest first.
pub async fn list_pending(conn: &mut SqliteConnection) -> Result<Vec<JobPostingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>(&format!(
        "SELECT {JOB_COLUMNS} FROM job_postings WHERE approved = 0 ORDER BY posted_date, id"
    ))
    .fetch_all(conn)
    .await
}

pub async fn find_posting(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<JobPostingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>(&format!(
        "SELECT {JOB_COLUMNS} FROM job_postings WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await
}

#[cfg(test)]
pub(crate) fn sample_posting(title: &str, company: &str, category: &str, job_type: &str) -> NewJobPosting {
    NewJobPosting {
        title: title.to_string(),
        company: company.to_string(),
        location: "Remote".to_string(),
        description: format!("{title} at {company}"),
        category: category.to_string(),
        job_type: job_type.to_string(),
        salary: String::new(),
        deadline: String::new(),
    }
}
