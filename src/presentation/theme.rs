use colored::Colorize;

pub struct Theme {
    pub title: fn(&str) -> String,
    pub header: fn(&str) -> String,
    pub venue: fn(&str) -> String,
    pub meta: fn(&str) -> String,
    pub label: fn(&str) -> String,
    pub count: fn(&str) -> String,
    pub page_current: fn(&str) -> String,
    pub page_other: fn(&str) -> String,
    pub empty: fn(&str) -> String,
    pub error: fn(&str) -> String,
    pub hint: fn(&str) -> String,
    pub url: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "felt" | "" => Self::felt(),
            "mono" => Self::mono(),
            "neon" => Self::neon(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::felt() // Fallback to default
            }
        }
    }

    fn felt() -> Self {
        Self {
            title: |s| s.bright_green().bold().underline().to_string(),
            header: |s| s.green().bold().to_string(),
            venue: |s| s.bright_white().bold().to_string(),
            meta: |s| s.white().dimmed().to_string(),
            label: |s| s.cyan().to_string(),
            count: |s| s.bright_black().to_string(),
            page_current: |s| s.bright_green().bold().to_string(),
            page_other: |s| s.bright_black().to_string(),
            empty: |s| s.yellow().to_string(),
            error: |s| s.red().bold().to_string(),
            hint: |s| s.bright_black().italic().to_string(),
            url: |s| s.blue().underline().to_string(),
        }
    }

    fn mono() -> Self {
        Self {
            title: |s| s.bold().underline().to_string(),
            header: |s| s.bold().to_string(),
            venue: |s| s.bold().to_string(),
            meta: |s| s.dimmed().to_string(),
            label: |s| s.normal().to_string(),
            count: |s| s.dimmed().to_string(),
            page_current: |s| s.bold().underline().to_string(),
            page_other: |s| s.dimmed().to_string(),
            empty: |s| s.normal().to_string(),
            error: |s| s.bold().to_string(),
            hint: |s| s.dimmed().italic().to_string(),
            url: |s| s.underline().to_string(),
        }
    }

    fn neon() -> Self {
        Self {
            title: |s| s.bright_magenta().italic().bold().underline().to_string(),
            header: |s| s.bright_cyan().bold().to_string(),
            venue: |s| s.bright_yellow().bold().to_string(),
            meta: |s| s.bright_white().dimmed().to_string(),
            label: |s| s.bright_cyan().to_string(),
            count: |s| s.bright_black().to_string(),
            page_current: |s| s.bright_magenta().bold().to_string(),
            page_other: |s| s.bright_black().to_string(),
            empty: |s| s.bright_yellow().to_string(),
            error: |s| s.bright_red().bold().to_string(),
            hint: |s| s.bright_black().italic().to_string(),
            url: |s| s.bright_blue().underline().to_string(),
        }
    }
}
