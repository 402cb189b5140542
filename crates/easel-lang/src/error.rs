use thiserror::Error;

/// What went wrong. Each kind has a stable code shown next to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,               // E001 wrong token count, malformed token, bad structure
    UnknownCommand,      // E002 unrecognised keyword
    UnknownVariable,     // E003 reference to an undefined variable
    DuplicateDefinition, // E004 method name already defined
    Geometry,            // E005 triangle height is not real-valued
    CyclicCall,          // E006 method calls itself, directly or through others
    UnknownMethod,       // E007 `call` of a method that was never defined
    UnterminatedBlock,   // E008 `loop` / `method` without its closing keyword
    StepLimit,           // E009 step or call-depth budget exhausted
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse               => "E001",
            Self::UnknownCommand      => "E002",
            Self::UnknownVariable     => "E003",
            Self::DuplicateDefinition => "E004",
            Self::Geometry            => "E005",
            Self::CyclicCall          => "E006",
            Self::UnknownMethod       => "E007",
            Self::UnterminatedBlock   => "E008",
            Self::StepLimit           => "E009",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Parse               => "parse error",
            Self::UnknownCommand      => "unknown command",
            Self::UnknownVariable     => "unknown variable",
            Self::DuplicateDefinition => "duplicate definition",
            Self::Geometry            => "geometry error",
            Self::CyclicCall          => "cyclic call",
            Self::UnknownMethod       => "unknown method",
            Self::UnterminatedBlock   => "unterminated block",
            Self::StepLimit           => "step limit",
        }
    }
}

/// A failure tied to the script line that caused it.
///
/// `line` is 1-based within the submission; `raw` is the line text as
/// written (trimmed), so hosts can show it without keeping the script around.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{}] line {line}: {message} (in `{raw}`)", .kind.code())]
pub struct ScriptError {
    pub kind: ErrorKind,
    pub line: usize,
    pub raw: String,
    pub message: String,
}

impl ScriptError {
    pub fn new(kind: ErrorKind, line: usize, raw: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind, line, raw: raw.into(), message: message.into() }
    }
}
