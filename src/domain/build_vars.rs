//! Rendering of the make variable file consumed by the build engine.

use std::fmt::Write as _;

use crate::domain::dir_config::ResolvedDirConfig;
use crate::domain::objlib::objlib_to_path;
use crate::domain::project::ProjectDescriptor;
use crate::domain::rules::TargetOwnership;

const HEADER: [&str; 2] =
    ["# This file is generated by makei, DO NOT EDIT.", "# Modify .ibmi.json to override values"];

/// Everything the variable file is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct BuildVars<'a> {
    pub project: &'a ProjectDescriptor,
    pub dirs: &'a ResolvedDirConfig,
    pub targets: &'a TargetOwnership,
    pub color: bool,
}

impl BuildVars<'_> {
    /// Render the full file. Identical inputs always render identical bytes.
    pub fn render(&self) -> String {
        let project = self.project;
        let mut out = String::new();

        for line in HEADER {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');

        let globals = [
            ("curlib", project.curlib.clone()),
            ("preUsrlibl", project.pre_usrlibl.join(" ")),
            ("postUsrlibl", project.post_usrlibl.join(" ")),
            ("INCDIR", project.include_path.join(" ")),
            ("IBMiEnvCmd", project.ibmi_env_cmds()),
            ("COLOR_TTY", self.color.to_string()),
        ];
        for (name, value) in globals {
            assign(&mut out, name, &value);
        }
        out.push_str("\n\n");

        for (dir, config) in self.dirs.iter() {
            let dir = dir.display();
            assign(&mut out, &format!("TGTCCSID_{dir}"), &config.tgt_ccsid.to_string());
            assign(
                &mut out,
                &format!("OBJPATH_{dir}"),
                &objlib_to_path(&config.objlib, &project.curlib),
            );
        }

        for (name, dir) in self.targets.iter() {
            assign(&mut out, &format!("{name}_d"), &dir.display().to_string());
        }

        out
    }
}

fn assign(out: &mut String, name: &str, value: &str) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{name} := {value}");
}
