use crate::error::WatchError;
use crate::review::types::Homework;

/// Review outcome for a homework. The API only ever reports these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn parse(raw: &str) -> Result<Self, WatchError> {
        match raw {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(WatchError::UnknownStatus(other.to_string())),
        }
    }

    /// Verdict text shown to the student, verbatim from the review service.
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Build the chat message for one homework record.
pub fn format_status(homework: &Homework) -> Result<String, WatchError> {
    let status = HomeworkStatus::parse(&homework.status)?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework.homework_name,
        status.verdict()
    ))
}
