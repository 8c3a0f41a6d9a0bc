//! Project descriptor model and parser (`iproj.json`).

use std::fmt;

use serde::Deserialize;

use crate::domain::AppError;

pub const PROJECT_DESCRIPTOR_FILE: &str = "iproj.json";

/// Current-library value meaning "let the job pick its default".
pub const DEFAULT_CURLIB: &str = "*CRTDFT";

/// Character-set identifier objects are compiled with.
///
/// Descriptors write numeric CCSIDs as JSON numbers (`37`) and special values
/// as strings (`"*JOB"`); both forms are kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Ccsid {
    Number(u32),
    Special(String),
}

impl fmt::Display for Ccsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ccsid::Number(value) => write!(f, "{value}"),
            Ccsid::Special(value) => f.write_str(value),
        }
    }
}

impl From<u32> for Ccsid {
    fn from(value: u32) -> Self {
        Ccsid::Number(value)
    }
}

impl From<&str> for Ccsid {
    fn from(value: &str) -> Self {
        Ccsid::Special(value.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProjectDescriptor {
    objlib: Option<String>,
    tgt_ccsid: Option<Ccsid>,
    curlib: Option<String>,
    #[serde(default)]
    pre_usrlibl: Vec<String>,
    #[serde(default)]
    post_usrlibl: Vec<String>,
    #[serde(default)]
    include_path: Vec<String>,
    #[serde(rename = "setIBMiEnvCmd")]
    set_ibmi_env_cmd: Option<Vec<String>>,
}

/// Project-level build settings, immutable for the lifetime of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub objlib: String,
    pub tgt_ccsid: Ccsid,
    pub curlib: String,
    pub pre_usrlibl: Vec<String>,
    pub post_usrlibl: Vec<String>,
    pub include_path: Vec<String>,
    pub set_ibmi_env_cmd: Option<Vec<String>>,
}

impl ProjectDescriptor {
    /// Parse descriptor JSON. `origin` names the file in error messages.
    pub fn parse_json(content: &str, origin: &str) -> Result<Self, AppError> {
        let raw: RawProjectDescriptor =
            serde_json::from_str(content).map_err(|e| AppError::parse_error(origin, e))?;

        let objlib = raw
            .objlib
            .filter(|lib| !lib.trim().is_empty())
            .ok_or(AppError::MissingDescriptorField { field: "objlib", path: origin.into() })?;
        let tgt_ccsid = raw
            .tgt_ccsid
            .ok_or(AppError::MissingDescriptorField { field: "tgtCcsid", path: origin.into() })?;

        Ok(Self {
            objlib,
            tgt_ccsid,
            curlib: raw.curlib.unwrap_or_else(|| DEFAULT_CURLIB.to_string()),
            pre_usrlibl: raw.pre_usrlibl,
            post_usrlibl: raw.post_usrlibl,
            include_path: raw.include_path,
            set_ibmi_env_cmd: raw.set_ibmi_env_cmd,
        })
    }

    /// Environment setup commands joined with a literal `\n` so make can re-split them.
    pub fn ibmi_env_cmds(&self) -> String {
        self.set_ibmi_env_cmd.as_deref().map(|cmds| cmds.join("\\n")).unwrap_or_default()
    }
}
