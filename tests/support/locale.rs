use std::convert::Infallible;
use std::str::FromStr;

/// Language value supplied through a behaviour step, with quotes removed.
#[derive(Clone, Debug)]
pub struct StepLanguage {
    raw: String,
}

impl FromStr for StepLanguage {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let raw = input
            .trim()
            .trim_matches(|candidate| matches!(candidate, '"' | '\''))
            .to_owned();

        Ok(Self { raw })
    }
}

impl StepLanguage {
    /// Consumes the step value, yielding the unquoted text.
    pub fn into_inner(self) -> String {
        self.raw
    }

    /// Splits a comma-separated list of tags.
    pub fn into_list(self) -> Vec<String> {
        self.raw
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
