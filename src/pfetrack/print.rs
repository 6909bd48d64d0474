use chrono::Utc;
use colored::Colorize;
use pfetrack::model::{
    Appointment, AppointmentStatus, Notification, NotificationKind, Project, ProjectStatus,
};
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const TITLE_WIDTH: usize = 48;

fn pad(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    if current >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - current))
}

fn project_status_label(status: ProjectStatus) -> colored::ColoredString {
    match status {
        ProjectStatus::InProgress => "in progress".cyan(),
        ProjectStatus::AwaitingValidation => "awaiting validation".yellow(),
        ProjectStatus::Signed => "signed".green(),
        ProjectStatus::Completed => "completed".green().bold(),
    }
}

fn appointment_status_label(status: AppointmentStatus) -> colored::ColoredString {
    match status {
        AppointmentStatus::Pending => "pending".yellow(),
        AppointmentStatus::Accepted => "accepted".green(),
        AppointmentStatus::Postponed => "postponed".cyan(),
        AppointmentStatus::Cancelled => "cancelled".red(),
    }
}

pub fn print_projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects.");
        return;
    }
    for project in projects {
        println!(
            "{}  {}  {}  {:>3}%  {}",
            project.id.yellow(),
            pad(&project.title, TITLE_WIDTH).bold(),
            pad(&project.student_name, 20),
            project.progress.overall_completion(),
            project_status_label(project.status)
        );
    }
}

pub fn print_appointments(appointments: &[Appointment]) {
    if appointments.is_empty() {
        println!("No appointments.");
        return;
    }
    for appointment in appointments {
        println!(
            "{}  {}  {}  {}  {}",
            appointment.id.yellow(),
            appointment.date,
            appointment.time_slot,
            pad(&appointment.student_name, 20),
            appointment_status_label(appointment.status)
        );
    }
}

pub fn print_notifications(notifications: &[Notification]) {
    if notifications.is_empty() {
        println!("No notifications.");
        return;
    }
    let formatter = Formatter::new();
    for notification in notifications {
        let age = Utc::now()
            .signed_duration_since(notification.issued_at)
            .to_std()
            .unwrap_or_default();
        let marker = match notification.kind {
            NotificationKind::Info => "·".dimmed(),
            NotificationKind::Alert => "!".yellow(),
            NotificationKind::Urgent => "!!".red().bold(),
        };
        let message = if notification.active {
            notification.message.normal()
        } else {
            notification.message.dimmed().strikethrough()
        };
        println!(
            "{:>2} {}  {}",
            marker,
            message,
            formatter.convert(age).italic().dimmed()
        );
    }
}
