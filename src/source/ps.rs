use crate::error::SourceError;
use std::process::Command;

const PS: &str = "ps";

/// Columns requested from `ps`, in the order the parser expects them.
pub const PS_COLUMNS: &str = "pid,user,%cpu,%mem,args";

/// Produces one raw process listing, header line first.
pub trait ProcessSampler {
    fn sample(&self) -> Result<String, SourceError>;
}

/// Runs `ps -eo pid,user,%cpu,%mem,args`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PsSampler;

impl ProcessSampler for PsSampler {
    fn sample(&self) -> Result<String, SourceError> {
        let output = Command::new(PS)
            .args(["-eo", PS_COLUMNS])
            .output()
            .map_err(|source| SourceError::Spawn { program: PS, source })?;

        if !output.status.success() {
            return Err(SourceError::Exit {
                program: PS,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
