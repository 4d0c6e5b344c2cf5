/// Line that ends multi-line manual input
pub const INPUT_SENTINEL: &str = "END";

/// Options offered by the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    ManualInput,
    ReadFile,
    Exit,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 3] = [MenuCommand::ManualInput, MenuCommand::ReadFile, MenuCommand::Exit];

    /// Map a menu selection such as `"2"` to its command
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::ManualInput),
            "2" => Some(Self::ReadFile),
            "3" => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Self::ManualInput => '1',
            Self::ReadFile => '2',
            Self::Exit => '3',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ManualInput => "Input teks manual",
            Self::ReadFile => "Baca dari file",
            Self::Exit => "Exit",
        }
    }
}

/// Menu listing printed at session start
pub fn render_menu() -> String {
    let mut out = String::from("Opsi:");
    for command in MenuCommand::ALL {
        out.push_str(&format!("\n{}. {}", command.key(), command.label()));
    }
    out
}

/// True for the line that terminates manual input
pub fn is_sentinel(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(INPUT_SENTINEL)
}

/// Interpret a y/n prompt answer; anything but `y` declines
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
