use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    response::Redirect,
};
use serde::Serialize;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{error, info};

use crate::applications::uploads::{discard_resume, save_resume};
use crate::errors::AppError;
use crate::forms::{optional, Required};
use crate::jobs::store::find_posting;
use crate::models::application::ApplicationRow;
use crate::render::{redirect_with_notice, FlashQuery, NoticeCode, Page};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ApplicationsView {
    pub applications: Vec<ApplicationRow>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub cover_letter: String,
    pub resume_filename: Option<String>,
}

/// Every application with the title and company of its job, newest first.
pub async fn list_applications(
    conn: &mut SqliteConnection,
) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        r#"
        SELECT applications.id, applications.job_id, applications.student_name,
               applications.student_email, applications.resume_filename,
               applications.cover_letter, applications.submission_date,
               job_postings.title, job_postings.company
        FROM applications
        JOIN job_postings ON applications.job_id = job_postings.id
        ORDER BY applications.submission_date DESC, applications.id DESC
        "#,
    )
    .fetch_all(conn)
    .await
}

pub async fn insert_application(
    conn: &mut SqliteConnection,
    application: &NewApplication,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO applications
            (job_id, student_name, student_email, resume_filename, cover_letter)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(application.job_id)
    .bind(&application.student_name)
    .bind(&application.student_email)
    .bind(&application.resume_filename)
    .bind(&application.cover_letter)
    .execute(conn)
    .await?;
    Ok(result.last_insert_rowid())
}

async fn load_applications(pool: &SqlitePool) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    list_applications(&mut conn).await
}

async fn commit_application(
    mut tx: Transaction<'_, Sqlite>,
    application: &NewApplication,
) -> Result<i64, sqlx::Error> {
    let id = insert_application(&mut tx, application).await?;
    tx.commit().await?;
    Ok(id)
}

/// GET /applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(flash): Query<FlashQuery>,
) -> Page<ApplicationsView> {
    match load_applications(&state.db).await {
        Ok(applications) => {
            Page::new("applications.html", ApplicationsView { applications }).with_flash(&flash)
        }
        Err(e) => {
            error!("Failed to load applications: {e}");
            Page::new(
                "applications.html",
                ApplicationsView {
                    applications: Vec::new(),
                },
            )
            .with_flash(&flash)
            .with_notice(NoticeCode::ApplicationsLoadFailed)
        }
    }
}

/// Fields collected from the multipart body before anything is stored.
#[derive(Debug, Default)]
struct ApplicationUpload {
    student_name: Option<String>,
    student_email: Option<String>,
    cover_letter: Option<String>,
    resume: Option<(String, Bytes)>,
}

async fn read_upload(mut multipart: Multipart) -> Result<ApplicationUpload, AppError> {
    let mut upload = ApplicationUpload::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or("") {
            "student_name" => upload.student_name = Some(field.text().await?),
            "student_email" => upload.student_email = Some(field.text().await?),
            "cover_letter" => upload.cover_letter = Some(field.text().await?),
            "resume" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await?;
                // Browsers send an empty part when no file was chosen.
                if !file_name.is_empty() {
                    upload.resume = Some((file_name, data));
                }
            }
            _ => {
                field.bytes().await?;
            }
        }
    }

    Ok(upload)
}

/// POST /jobs/:id/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let upload = read_upload(multipart).await?;

    let mut required = Required::new();
    let student_name = required.take("student_name", upload.student_name);
    let student_email = required.take("student_email", upload.student_email);
    required.finish()?;

    let mut tx = state.db.begin().await?;

    match find_posting(&mut tx, job_id).await? {
        Some(job) if job.approved => {}
        _ => return Err(AppError::NotFound(format!("Job {job_id} not found"))),
    }

    let upload_dir = state.upload_dir();
    let resume_filename = match &upload.resume {
        Some((file_name, data)) => Some(save_resume(&upload_dir, file_name, data).await?),
        None => None,
    };

    let application = NewApplication {
        job_id,
        student_name,
        student_email,
        cover_letter: optional(upload.cover_letter),
        resume_filename,
    };

    match commit_application(tx, &application).await {
        Ok(id) => {
            info!(application_id = id, job_id, "application submitted");
            Ok(redirect_with_notice(
                "/applications",
                NoticeCode::ApplicationSubmitted,
            ))
        }
        Err(e) => {
            if let Some(stored_name) = &application.resume_filename {
                discard_resume(&upload_dir, stored_name).await;
            }
            Err(AppError::Database(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::jobs::store::{insert_posting, sample_posting};

    #[tokio::test]
    async fn test_list_joins_job_details() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let job_id = insert_posting(&mut conn, &sample_posting("Intern", "Acme", "Technology", "Internship"))
            .await
            .unwrap();

        for name in ["Ada", "Grace"] {
            insert_application(
                &mut conn,
                &NewApplication {
                    job_id,
                    student_name: name.to_string(),
                    student_email: format!("{name}@school.edu"),
                    cover_letter: String::new(),
                    resume_filename: None,
                },
            )
            .await
            .unwrap();
        }

        let rows = list_applications(&mut conn).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].student_name, "Grace");
        assert_eq!(rows[0].title, "Intern");
        assert_eq!(rows[0].company, "Acme");
        assert_eq!(rows[0].resume_filename, None);
    }

    #[tokio::test]
    async fn test_insert_for_missing_job_violates_foreign_key() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let result = insert_application(
            &mut conn,
            &NewApplication {
                job_id: 999,
                student_name: "Ada".into(),
                student_email: "ada@school.edu".into(),
                cover_letter: String::new(),
                resume_filename: None,
            },
        )
        .await;
        assert!(result.is_err());
    }
}
