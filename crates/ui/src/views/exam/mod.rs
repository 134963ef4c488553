mod exam;
mod loading;
mod modals;
mod question;
mod results;
mod scripts;
mod setup;

pub use exam::ExamView;
#[cfg(test)]
pub(crate) use question::QuestionPanel;
#[cfg(test)]
pub(crate) use results::ResultsPanel;
