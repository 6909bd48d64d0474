//! Booking notifier seam.
//!
//! Appointment bookings trigger an email-style side channel that lives
//! outside the core. The core only knows the payload shape and the
//! fire-and-forget contract: the appointment is persisted regardless of
//! notifier outcome, and notifier failures are logged, never propagated.

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::{Appointment, TimeSlot};

/// Fixed payload shape handed to the external notifier.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingNotice {
    pub student_name: String,
    pub project_title: String,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub reason: String,
}

impl BookingNotice {
    pub fn for_appointment(appointment: &Appointment) -> Self {
        Self {
            student_name: appointment.student_name.clone(),
            project_title: appointment.project_title.clone(),
            date: appointment.date,
            time_slot: appointment.time_slot,
            reason: appointment.reason.clone(),
        }
    }
}

pub trait BookingNotifier {
    fn notify(&self, notice: &BookingNotice) -> Result<()>;
}

impl<T: BookingNotifier + ?Sized> BookingNotifier for std::rc::Rc<T> {
    fn notify(&self, notice: &BookingNotice) -> Result<()> {
        (**self).notify(notice)
    }
}

/// Default notifier: does nothing. Used when no side channel is wired.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl BookingNotifier for NoopNotifier {
    fn notify(&self, _notice: &BookingNotice) -> Result<()> {
        Ok(())
    }
}

/// Notifier that records the booking in the log stream. The CLI uses it
/// in place of the portal's mail relay.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl BookingNotifier for LogNotifier {
    fn notify(&self, notice: &BookingNotice) -> Result<()> {
        tracing::info!(
            student = %notice.student_name,
            project = %notice.project_title,
            date = %notice.date,
            slot = %notice.time_slot,
            "appointment booked"
        );
        Ok(())
    }
}
