//! Source tree fixtures.

use std::fs;
use std::path::Path;

pub(crate) const IPROJ: &str = r#"{
  "description": "fixture project",
  "objlib": "LIBA",
  "curlib": "LIBA",
  "tgtCcsid": 37,
  "preUsrlibl": ["PRE1"],
  "postUsrlibl": ["POST1", "POST2"],
  "includePath": ["qprotosrc"],
  "setIBMiEnvCmd": ["CHGJOB CCSID(37)"]
}"#;

pub(crate) fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&path, content).expect("Failed to write fixture file");
}

/// A two-level project: `qrpglesrc` inherits the defaults, `qrpglesrc/utils`
/// overrides the CCSID only.
pub(crate) fn write_sample(root: &Path) {
    write(root, "iproj.json", IPROJ);
    write(root, "qrpglesrc/Rules.mk", "HELLO.PGM: hello.pgm.rpgle\n\t@echo building\n# note\nX = 1\n");
    write(root, "qrpglesrc/utils/Rules.mk", "UTIL.SRVPGM: util.bnd UTIL.MODULE\nUTIL.MODULE: util.rpgle\n");
    write(root, "qrpglesrc/utils/.ibmi.json", r#"{"version":"0.0.1","build":{"tgtCcsid":1208}}"#);
}
