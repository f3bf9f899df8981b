use crate::error::{ClassroomError, Result};
use rollcall_database::{Database, EnrollmentRepository, SessionRepository, SubjectRepository, UserRepository};
use rollcall_models::{EnrollmentWithSubject, SessionWithSubject};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A student reference in a bulk enrollment request: either a bare roll
/// number or an object carrying an optional name to cross-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudentRef {
    RollNumber(String),
    Detailed {
        roll_number: String,
        name: Option<String>,
    },
}

impl StudentRef {
    fn roll_number(&self) -> &str {
        match self {
            StudentRef::RollNumber(roll) => roll,
            StudentRef::Detailed { roll_number, .. } => roll_number,
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            StudentRef::RollNumber(_) => None,
            StudentRef::Detailed { name, .. } => name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkEnrollRequest {
    pub students: Vec<StudentRef>,
    pub subject_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectInfo {
    pub id: Uuid,
    pub name: String,
    pub course_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrolledStudent {
    pub name: String,
    pub email: String,
    pub roll_number: Option<String>,
}

/// Per-subject outcome of a bulk enrollment
#[derive(Debug, Serialize, Deserialize)]
pub struct SubjectEnrollmentOutcome {
    pub subject: SubjectInfo,
    pub enrolled: Vec<EnrolledStudent>,
    pub already_enrolled: Vec<EnrolledStudent>,
}

pub struct EnrollmentService {
    user_repo: UserRepository,
    subject_repo: SubjectRepository,
    enrollment_repo: EnrollmentRepository,
    session_repo: SessionRepository,
}

impl EnrollmentService {
    pub fn new(db: &Database) -> Self {
        Self {
            user_repo: UserRepository::new(db.pool().clone()),
            subject_repo: SubjectRepository::new(db.pool().clone()),
            enrollment_repo: EnrollmentRepository::new(db.pool().clone()),
            session_repo: SessionRepository::new(db.pool().clone()),
        }
    }

    /// Enroll a batch of students (matched by roll number) into a batch of
    /// subjects, reporting per subject who was newly enrolled and who
    /// already was. Earlier writes are not rolled back when a later entry
    /// is skipped; the per-item outcome is the contract.
    pub async fn bulk_enroll(&self, request: BulkEnrollRequest) -> Result<Vec<SubjectEnrollmentOutcome>> {
        if request.students.is_empty() || request.subject_ids.is_empty() {
            return Err(ClassroomError::InvalidInput(
                "Provide at least one student and one subject".to_string(),
            ));
        }

        let subjects = self.subject_repo.find_by_ids(&request.subject_ids).await?;

        let mut outcomes: Vec<SubjectEnrollmentOutcome> = subjects
            .iter()
            .map(|subject| SubjectEnrollmentOutcome {
                subject: SubjectInfo {
                    id: subject.id,
                    name: subject.name.clone(),
                    course_code: subject.course_code.clone(),
                },
                enrolled: Vec::new(),
                already_enrolled: Vec::new(),
            })
            .collect();

        for student_ref in &request.students {
            let student = match self
                .user_repo
                .find_student_by_roll_number(student_ref.roll_number())
                .await?
            {
                Some(student) => student,
                None => continue, // unknown roll numbers are skipped, not fatal
            };

            // Optional cross-check: a supplied name must match the record
            if let Some(name) = student_ref.name() {
                if !student.name.eq_ignore_ascii_case(name) {
                    continue;
                }
            }

            let existing = self
                .enrollment_repo
                .enrolled_subject_ids(student.id, &request.subject_ids)
                .await?;

            let summary = EnrolledStudent {
                name: student.name.clone(),
                email: student.email.clone(),
                roll_number: student.roll_number.clone(),
            };

            for outcome in outcomes.iter_mut() {
                if existing.contains(&outcome.subject.id) {
                    outcome.already_enrolled.push(summary.clone());
                    continue;
                }

                match self.enrollment_repo.create(student.id, outcome.subject.id).await {
                    Ok(_) => outcome.enrolled.push(summary.clone()),
                    // Lost a race with a concurrent enrollment; same outcome
                    Err(rollcall_database::DatabaseError::DuplicateEntry(_)) => {
                        outcome.already_enrolled.push(summary.clone())
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        Ok(outcomes)
    }

    /// Every registered student, for the admin enrollment dashboard
    pub async fn list_students(&self) -> Result<Vec<rollcall_models::StudentSummary>> {
        Ok(self.user_repo.list_students().await?)
    }

    /// A student's enrollments with subject and admin context
    pub async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<EnrollmentWithSubject>> {
        Ok(self.enrollment_repo.list_for_student(student_id).await?)
    }

    /// Session feed for a student: active and expired sessions of every
    /// subject they are enrolled in, newest first
    pub async fn sessions_for_student(&self, student_id: Uuid) -> Result<Vec<SessionWithSubject>> {
        let subject_ids = self.enrollment_repo.subject_ids_for_student(student_id).await?;
        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.session_repo.list_for_subjects(&subject_ids).await?)
    }
}
