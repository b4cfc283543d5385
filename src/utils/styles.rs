//! Used to color and otherwise style various bits of output. Styling is either on or
//! off for the whole run, see init_styles.
use nu_ansi_term::{Color, Style};
use std::sync::OnceLock;

static ENABLED: OnceLock<bool> = OnceLock::new();

/// Should be called once before anything is printed. If it isn't called output
/// is plain.
pub fn init_styles(enabled: bool) {
    let _ = ENABLED.set(enabled);
}

fn styled(text: &str, style: Style) -> String {
    if *ENABLED.get().unwrap_or(&false) {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

pub trait Styling {
    fn explain_title(self) -> String;
    fn explain_text(self) -> String;
    fn table_header(self) -> String;
    fn table_sep(self) -> String;
    fn table_field(self) -> String;
    fn heading(self) -> String;
    fn warn(self) -> String;
}

impl Styling for &str {
    fn explain_title(self) -> String {
        styled(self, Color::Blue.bold())
    }

    fn explain_text(self) -> String {
        styled(self, Style::new().italic())
    }

    fn table_header(self) -> String {
        styled(self, Style::new().bold())
    }

    fn table_sep(self) -> String {
        styled(self, Style::new().dimmed())
    }

    fn table_field(self) -> String {
        styled(self, Style::new())
    }

    /// File names and section titles.
    fn heading(self) -> String {
        styled(self, Color::Green.bold())
    }

    fn warn(self) -> String {
        styled(self, Color::Red.bold())
    }
}

impl Styling for String {
    fn explain_title(self) -> String {
        self.as_str().explain_title()
    }

    fn explain_text(self) -> String {
        self.as_str().explain_text()
    }

    fn table_header(self) -> String {
        self.as_str().table_header()
    }

    fn table_sep(self) -> String {
        self.as_str().table_sep()
    }

    fn table_field(self) -> String {
        self.as_str().table_field()
    }

    fn heading(self) -> String {
        self.as_str().heading()
    }

    fn warn(self) -> String {
        self.as_str().warn()
    }
}
