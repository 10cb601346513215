/// Screensaver command-line modes.
///
/// Windows starts a screensaver with `/s` (run), `/c` (configure, optionally
/// `/c:<hwnd>`), or `/p <hwnd>` (preview inside the control panel). Flags are
/// case-insensitive and may also use a `-` prefix. Opening the file with no
/// arguments means "configure".
use crate::error::LaunchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Fullscreen; any input dismisses.
    Screensaver,
    /// Settings dialog.
    Configure,
    /// Render inside the given parent window.
    Preview { parent: u64 },
    /// Ordinary resizable window that ignores input.
    Windowed,
}

impl LaunchMode {
    /// Parse the arguments after the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let Some(first) = args.next() else {
            return Ok(Self::Configure);
        };
        let first = first.as_ref().trim();

        let body = first
            .strip_prefix('/')
            .or_else(|| first.strip_prefix('-'))
            .ok_or_else(|| LaunchError::UnknownFlag(first.to_string()))?;
        let (flag, inline_value) = match body.split_once(':') {
            Some((flag, value)) => (flag, Some(value)),
            None => (body, None),
        };

        match flag.to_ascii_lowercase().as_str() {
            "s" => Ok(Self::Screensaver),
            "c" => Ok(Self::Configure),
            "w" => Ok(Self::Windowed),
            "p" => {
                let raw = match inline_value {
                    Some(v) => v.to_string(),
                    None => args
                        .next()
                        .map(|a| a.as_ref().trim().to_string())
                        .ok_or(LaunchError::MissingHandle)?,
                };
                let parent = raw
                    .parse::<u64>()
                    .map_err(|_| LaunchError::InvalidHandle(raw.clone()))?;
                Ok(Self::Preview { parent })
            }
            _ => Err(LaunchError::UnknownFlag(first.to_string())),
        }
    }

    /// `true` for modes where keyboard or mouse input should close the app.
    pub fn exits_on_input(self) -> bool {
        matches!(self, Self::Screensaver)
    }
}
