use std::path::{MAIN_SEPARATOR, Path};

pub trait SlashPathExt {
    /// Lossy string form using `/` as separator on every platform.
    fn to_slash_string(&self) -> String;

    /// Form used in messages: the canonical path when it resolves, the path
    /// as given otherwise.
    fn slash_display(&self) -> String;
}

impl SlashPathExt for Path {
    fn to_slash_string(&self) -> String {
        let rendered = self.to_string_lossy();
        if MAIN_SEPARATOR == '/' {
            rendered.into_owned()
        } else {
            rendered.replace(MAIN_SEPARATOR, "/")
        }
    }

    fn slash_display(&self) -> String {
        match self.canonicalize() {
            Ok(canonical) => canonical.to_slash_string(),
            Err(_) => self.to_slash_string(),
        }
    }
}
