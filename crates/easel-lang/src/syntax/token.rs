/// Command keywords. The first token of a line, lower-cased, selects one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Drawing
    MoveTo,
    DrawTo,
    Pen,
    Fill,
    Clear,
    Reset,
    Circle,
    Rectangle,
    Triangle,
    DrawShape,

    // Control
    If,
    EndIf,
    Loop,
    EndLoop,
    Method,
    EndMethod,
    Call,
}

impl Keyword {
    /// Every keyword in the order it is listed to users.
    pub const ALL: [Keyword; 17] = [
        Self::MoveTo, Self::DrawTo, Self::Pen, Self::Fill, Self::Clear, Self::Reset,
        Self::Circle, Self::Rectangle, Self::Triangle, Self::DrawShape,
        Self::If, Self::EndIf, Self::Loop, Self::EndLoop,
        Self::Method, Self::EndMethod, Self::Call,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoveTo    => "moveto",
            Self::DrawTo    => "drawto",
            Self::Pen       => "pen",
            Self::Fill      => "fill",
            Self::Clear     => "clear",
            Self::Reset     => "reset",
            Self::Circle    => "circle",
            Self::Rectangle => "rectangle",
            Self::Triangle  => "triangle",
            Self::DrawShape => "drawshape",
            Self::If        => "if",
            Self::EndIf     => "endif",
            Self::Loop      => "loop",
            Self::EndLoop   => "endloop",
            Self::Method    => "method",
            Self::EndMethod => "endmethod",
            Self::Call      => "call",
        }
    }

    /// Usage line shown when a command's arguments are wrong.
    pub fn usage(&self) -> &'static str {
        match self {
            Self::MoveTo    => "usage: moveto <x> <y>",
            Self::DrawTo    => "usage: drawto <x> <y>",
            Self::Pen       => "usage: pen <red|green|black>",
            Self::Fill      => "usage: fill <on|off>",
            Self::Clear     => "usage: clear",
            Self::Reset     => "usage: reset",
            Self::Circle    => "usage: circle <radius>",
            Self::Rectangle => "usage: rectangle <width> <height>",
            Self::Triangle  => "usage: triangle <adj> <base> <hyp>",
            Self::DrawShape => "usage: drawshape <p1> [p2 ...]",
            Self::If        => "usage: if <term> <op> <term>  (op: < > = >= <= !=)",
            Self::EndIf     => "usage: endif",
            Self::Loop      => "usage: loop <count>",
            Self::EndLoop   => "usage: endloop",
            Self::Method    => "usage: method <name>",
            Self::EndMethod => "usage: endmethod",
            Self::Call      => "usage: call <name>",
        }
    }

    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Self::If | Self::EndIf | Self::Loop | Self::EndLoop
            | Self::Method | Self::EndMethod | Self::Call
        )
    }

    /// Comma-separated list of all keywords, for "unknown command" messages.
    pub fn listing() -> String {
        Self::ALL.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
    }
}

/// Maps a lower-cased word to its keyword.
pub fn keyword(word: &str) -> Option<Keyword> {
    Keyword::ALL.iter().copied().find(|k| k.as_str() == word)
}

/// `true` for words that may name a variable or a method:
/// a letter or `_`, then letters, digits or `_`.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
