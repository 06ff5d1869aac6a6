pub trait ToDashSeparators {
    /// Returns a copy with all `/` replaced by `-` and leading/trailing
    /// whitespace trimmed.
    fn to_dash_separators(&self) -> String;
}

impl ToDashSeparators for str {
    fn to_dash_separators(&self) -> String {
        self.trim().replace('/', "-")
    }
}

impl ToDashSeparators for String {
    fn to_dash_separators(&self) -> String {
        self.as_str().to_dash_separators()
    }
}

pub trait ToClockToken {
    /// Uppercased, space-free clock token: `" 9:30 p.m."` becomes `"9:30PM"`.
    fn to_clock_token(&self) -> String;
}

impl ToClockToken for str {
    fn to_clock_token(&self) -> String {
        self.trim()
            .to_ascii_uppercase()
            .replace("A.M.", "AM")
            .replace("P.M.", "PM")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}
