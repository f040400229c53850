//! Line-oriented front end over [`RegistrationService`].
//!
//! Stands in for the registration form: each input line is one button press,
//! and the reply carries the outcome message plus the refreshed panes. State
//! lives only as long as the [`Session`].
//!
//! Commands:
//! - `register <student-id> <student name...> <course-code>`
//! - `drop <student-id> <course-code>`
//! - `courses`
//! - `show <student-id>`
//! - `help`
//! - `quit` / `exit`
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::errors::RegistrationError;
use crate::registration::RegistrationService;
use crate::render::{Action, CourseList, RegisteredCourses};

/// Usage text printed by `help` and on malformed input.
pub const HELP: &str = "\
Commands:
  register <student-id> <student name...> <course-code>
  drop <student-id> <course-code>
  courses
  show <student-id>
  help
  quit
";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a student for a course.
    Register {
        /// Student id (first argument).
        student_id: String,
        /// Everything between the id and the course code, space-joined.
        student_name: String,
        /// Course code (last argument).
        course_code: String,
    },
    /// Drop a course for a student.
    Drop {
        /// Student id.
        student_id: String,
        /// Course code.
        course_code: String,
    },
    /// Print the course list.
    Courses,
    /// Print one student's registered courses.
    Show {
        /// Student id.
        student_id: String,
    },
    /// Print [`HELP`].
    Help,
    /// End the session.
    Quit,
}

/// Why a line could not be turned into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// First word is not a known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// Known command, wrong arguments.
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let (head, args) = match words.split_first() {
        Some((head, args)) => (head.to_lowercase(), args),
        None => return Ok(None),
    };

    let command = match (head.as_str(), args) {
        ("register", [id, name @ .., code]) if !name.is_empty() => Command::Register {
            student_id: (*id).to_string(),
            student_name: name.join(" "),
            course_code: (*code).to_string(),
        },
        ("register", _) => {
            return Err(ParseError::Usage(
                "register <student-id> <student name...> <course-code>",
            ));
        }
        ("drop", [id, code]) => Command::Drop {
            student_id: (*id).to_string(),
            course_code: (*code).to_string(),
        },
        ("drop", _) => return Err(ParseError::Usage("drop <student-id> <course-code>")),
        ("courses", []) => Command::Courses,
        ("show", [id]) => Command::Show {
            student_id: (*id).to_string(),
        },
        ("show", _) => return Err(ParseError::Usage("show <student-id>")),
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        _ => return Err(ParseError::UnknownCommand(head)),
    };
    Ok(Some(command))
}

/// What the session wants the driver to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print the text (possibly empty) and keep reading.
    Continue(String),
    /// Stop reading input.
    Quit,
}

/// A registration session over one service instance.
#[derive(Debug)]
pub struct Session {
    service: RegistrationService,
}

impl Session {
    /// Start a session; the service's state is kept for its whole lifetime.
    pub fn new(service: RegistrationService) -> Self {
        Self { service }
    }

    /// Underlying service.
    pub fn service(&self) -> &RegistrationService {
        &self.service
    }

    /// Parse and execute one line.
    pub fn handle_line(&mut self, line: &str) -> Step {
        match parse_line(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Step::Continue(String::new()),
            Err(err) => {
                debug!(%err, line, "rejected input line");
                Step::Continue(format!("{err}\n{HELP}"))
            }
        }
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> Step {
        let text = match command {
            Command::Register {
                student_id,
                student_name,
                course_code,
            } => {
                let result = self
                    .service
                    .register(&student_id, &student_name, &course_code)
                    .map(|_| ());
                self.report(Action::Register, result, &student_id)
            }
            Command::Drop {
                student_id,
                course_code,
            } => {
                let result = self
                    .service
                    .drop_course(&student_id, &course_code)
                    .map(|_| ());
                self.report(Action::Drop, result, &student_id)
            }
            Command::Courses => CourseList(self.service.catalog()).to_string(),
            Command::Show { student_id } => match self.service.student(&student_id) {
                Some(student) => RegisteredCourses {
                    student,
                    catalog: self.service.catalog(),
                }
                .to_string(),
                None => format!("No registrations for {student_id}.\n"),
            },
            Command::Help => HELP.to_string(),
            Command::Quit => return Step::Quit,
        };
        Step::Continue(text)
    }

    /// Outcome message, then the course list, then the touched student's pane
    /// when that student is on the roster.
    fn report(
        &self,
        action: Action,
        result: Result<(), RegistrationError>,
        student_id: &str,
    ) -> String {
        let message = match &result {
            Ok(()) => action.success_message(),
            Err(err) => {
                debug!(?action, %err, "request refused");
                action.failure_message(err)
            }
        };

        let catalog = self.service.catalog();
        let mut out = format!("{message}\n\n{}", CourseList(catalog));
        if let Some(student) = self.service.student(student_id) {
            out.push('\n');
            out.push_str(&RegisteredCourses { student, catalog }.to_string());
        }
        out
    }

    /// Drive the session from `input` until EOF or `quit`, writing replies to `output`.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD, so such a line is
    /// answered like any other malformed input. Only I/O failures end the session
    /// early.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            match self.handle_line(&line) {
                Step::Continue(text) => {
                    output.write_all(text.as_bytes())?;
                    output.flush()?;
                }
                Step::Quit => break,
            }
        }
        output.flush()
    }
}
