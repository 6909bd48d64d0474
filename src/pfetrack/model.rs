//! # Domain Model
//!
//! Core data types for the portal: [`Project`], [`Appointment`],
//! [`Notification`], [`TrackingSheet`] and [`User`], plus their status
//! enums.
//!
//! ## Identifiers
//!
//! All identifiers are opaque strings. Generated ids (documents,
//! notifications) are UUID v4 strings; seeded entities carry whatever id
//! the seed registry gave them. Uniqueness is enforced by the
//! repositories, not by the storage layer.
//!
//! ## Denormalized display fields
//!
//! A student's display name and avatar are copied onto every [`Project`]
//! and [`Appointment`] that references the student, so the UI can render
//! lists without a join. Cross-entity links are by id only — no entity
//! holds a live reference to another. The copies are kept consistent by
//! `repos::projects::sync_student_profile`, which must run immediately
//! after any profile mutation.
//!
//! ## Legacy tolerance
//!
//! Collections written by earlier releases may lack newer optional fields
//! (`documents`, `journal`, `student_avatar`, ...). Decoding defaults them
//! rather than rejecting the whole collection.
//!
//! ## Tracking sheets
//!
//! A sheet holds exactly [`CHECKPOINT_COUNT`] checkpoints, ordered by
//! checkpoint number. A checkpoint's supervisor stamp can only be applied
//! once the student signature is present; [`TrackingSheet::apply_supervisor_stamp`]
//! rejects the mutation otherwise.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StoreError};

/// Number of mandatory consultations tracked per project.
pub const CHECKPOINT_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Supervisor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    InProgress,
    AwaitingValidation,
    Signed,
    Completed,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Accepted,
    Postponed,
    Cancelled,
}

/// Fixed set of bookable consultation slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "09:00-10:00")]
    T0900,
    #[serde(rename = "10:00-11:00")]
    T1000,
    #[serde(rename = "11:00-12:00")]
    T1100,
    #[serde(rename = "14:00-15:00")]
    T1400,
    #[serde(rename = "15:00-16:00")]
    T1500,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 5] = [
        TimeSlot::T0900,
        TimeSlot::T1000,
        TimeSlot::T1100,
        TimeSlot::T1400,
        TimeSlot::T1500,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::T0900 => "09:00-10:00",
            TimeSlot::T1000 => "10:00-11:00",
            TimeSlot::T1100 => "11:00-12:00",
            TimeSlot::T1400 => "14:00-15:00",
            TimeSlot::T1500 => "15:00-16:00",
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Alert,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckpointStatus {
    Pending,
    InProgress,
    Completed,
}

impl Default for CheckpointStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// One named milestone inside a progress track, 0-100 complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub completion: u8,
    #[serde(default)]
    pub updated_on: Option<NaiveDate>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// The two progress tracks of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub experimental: Vec<Milestone>,
    #[serde(default)]
    pub writing: Vec<Milestone>,
}

impl Progress {
    /// Mean completion across both tracks, 0 when no milestones exist.
    pub fn overall_completion(&self) -> u8 {
        let milestones: Vec<&Milestone> =
            self.experimental.iter().chain(self.writing.iter()).collect();
        if milestones.is_empty() {
            return 0;
        }
        let total: u32 = milestones.iter().map(|m| u32::from(m.completion)).sum();
        (total / milestones.len() as u32) as u8
    }
}

/// Append-only journal entry, tagged with the author's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub text: String,
    pub author: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub url: String,
    pub date: NaiveDate,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    /// Immutable after creation; everything student-related hangs off it.
    pub student_id: String,
    pub student_name: String,
    pub student_email: String,
    #[serde(default)]
    pub student_avatar: Option<String>,
    #[serde(default)]
    pub student_phone: Option<String>,
    pub supervisor_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub progress: Progress,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub supervisor_signature: Option<String>,
    #[serde(default)]
    pub supervisor_stamp: Option<String>,
    #[serde(default)]
    pub supervisor_signed_on: Option<NaiveDate>,
    #[serde(default)]
    pub head_signature: Option<String>,
    #[serde(default)]
    pub head_stamp: Option<String>,
    #[serde(default)]
    pub head_signed_on: Option<NaiveDate>,
    #[serde(default)]
    pub proposal_url: Option<String>,
    #[serde(default)]
    pub journal: Vec<JournalEntry>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Project {
    /// Append a journal entry stamped with the current date and time.
    pub fn append_journal(&mut self, text: String, author: Role) {
        let now = Utc::now();
        self.journal.push(JournalEntry {
            date: now.date_naive(),
            time: now.time(),
            text,
            author,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    /// Copied from the student's project at insertion time; backfilled at
    /// read time for legacy records, never persisted by the backfill.
    #[serde(default)]
    pub student_avatar: Option<String>,
    pub project_id: String,
    pub project_title: String,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    #[serde(default)]
    pub reason: String,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// A postpone may touch only the date/slot pair and forces the status.
    pub fn postpone(&mut self, date: NaiveDate, slot: TimeSlot) {
        self.date = date;
        self.time_slot = slot;
        self.status = AppointmentStatus::Postponed;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub issued_at: DateTime<Utc>,
    pub author: String,
    pub kind: NotificationKind,
    pub active: bool,
    /// Present on personal notifications; broadcasts omit it.
    #[serde(default)]
    pub student_id: Option<String>,
}

impl Notification {
    pub fn new(
        message: impl Into<String>,
        author: impl Into<String>,
        kind: NotificationKind,
        student_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            issued_at: Utc::now(),
            author: author.into(),
            kind,
            active: true,
            student_id,
        }
    }
}

/// Student half of a checkpoint record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentBlock {
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub difficulties: String,
    #[serde(default)]
    pub signed: bool,
    #[serde(default)]
    pub signed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub signature: Option<String>,
}

/// Supervisor half of a checkpoint record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupervisorBlock {
    #[serde(default)]
    pub advancement: Option<String>,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub next_steps: String,
    #[serde(default)]
    pub signed: bool,
    #[serde(default)]
    pub stamped: bool,
    #[serde(default)]
    pub signed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// 1-based position, stable ordering key.
    pub number: u8,
    pub week: NaiveDate,
    #[serde(default)]
    pub status: CheckpointStatus,
    #[serde(default)]
    pub student: StudentBlock,
    #[serde(default)]
    pub supervisor: SupervisorBlock,
    #[serde(default)]
    pub department_visa: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalEvaluation {
    #[serde(default)]
    pub work_rating: Option<String>,
    #[serde(default)]
    pub report_rating: Option<String>,
    #[serde(default)]
    pub defensible: Option<bool>,
    #[serde(default)]
    pub supervisor_signed: bool,
    #[serde(default)]
    pub supervisor_stamped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSheet {
    pub id: String,
    pub project_id: String,
    pub student_name: String,
    pub supervisor_name: String,
    pub project_title: String,
    /// Always [`CHECKPOINT_COUNT`] entries, ordered by checkpoint number.
    pub checkpoints: Vec<Checkpoint>,
    #[serde(default)]
    pub final_evaluation: FinalEvaluation,
    pub report_deadline: NaiveDate,
    pub defense_deadline: NaiveDate,
}

impl TrackingSheet {
    /// Build the default six-checkpoint structure for a project.
    ///
    /// Sheets are created lazily on first access; this constructor is the
    /// caller's side of that contract — the repository only stores what it
    /// is given. Checkpoints are scheduled every two weeks from
    /// `first_week`.
    pub fn new(
        project: &Project,
        first_week: NaiveDate,
        report_deadline: NaiveDate,
        defense_deadline: NaiveDate,
    ) -> Self {
        let checkpoints = (1..=CHECKPOINT_COUNT as u8)
            .map(|number| Checkpoint {
                number,
                week: first_week + Duration::weeks(2 * i64::from(number - 1)),
                status: CheckpointStatus::Pending,
                student: StudentBlock::default(),
                supervisor: SupervisorBlock::default(),
                department_visa: false,
            })
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            project_id: project.id.clone(),
            student_name: project.student_name.clone(),
            supervisor_name: project.supervisor_name.clone(),
            project_title: project.title.clone(),
            checkpoints,
            final_evaluation: FinalEvaluation::default(),
            report_deadline,
            defense_deadline,
        }
    }

    pub fn checkpoint(&self, number: u8) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.number == number)
    }

    fn checkpoint_mut(&mut self, number: u8) -> Result<&mut Checkpoint> {
        self.checkpoints
            .iter_mut()
            .find(|c| c.number == number)
            .ok_or_else(|| StoreError::Invalid(format!("no checkpoint {number} on this sheet")))
    }

    /// Record the student signature on a checkpoint.
    pub fn sign_student(&mut self, number: u8, signature: Option<String>) -> Result<()> {
        let checkpoint = self.checkpoint_mut(number)?;
        checkpoint.student.signed = true;
        checkpoint.student.signed_at = Some(Utc::now());
        checkpoint.student.signature = signature;
        Ok(())
    }

    /// Record the supervisor signature on a checkpoint.
    pub fn sign_supervisor(&mut self, number: u8) -> Result<()> {
        let checkpoint = self.checkpoint_mut(number)?;
        checkpoint.supervisor.signed = true;
        checkpoint.supervisor.signed_at = Some(Utc::now());
        Ok(())
    }

    /// Apply the supervisor stamp to a checkpoint.
    ///
    /// Rejected unless the student signature is already present.
    pub fn apply_supervisor_stamp(&mut self, number: u8) -> Result<()> {
        let checkpoint = self.checkpoint_mut(number)?;
        if !checkpoint.student.signed {
            return Err(StoreError::Invalid(format!(
                "checkpoint {number}: supervisor stamp requires the student signature first"
            )));
        }
        checkpoint.supervisor.stamped = true;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub credential: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub matricule: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Partial profile mutation; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar.is_none()
    }
}
