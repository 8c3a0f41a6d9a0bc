//! Static object-type tables.
//!
//! Source file extensions and explicit object types map onto a closed set of
//! target groups. The tables are plain data; lookups are case-insensitive.

use std::fmt;

/// Object category understood by the build pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetGroup {
    Trg,
    Dta,
    Sql,
    Bndd,
    Pf,
    Lf,
    Dspf,
    Prtf,
    Cmd,
    Module,
    Srvpgm,
    Pgm,
    Menu,
    Pnlgrp,
    Qmqry,
    Wscst,
    Msg,
}

impl TargetGroup {
    pub const ALL: [TargetGroup; 17] = [
        TargetGroup::Trg,
        TargetGroup::Dta,
        TargetGroup::Sql,
        TargetGroup::Bndd,
        TargetGroup::Pf,
        TargetGroup::Lf,
        TargetGroup::Dspf,
        TargetGroup::Prtf,
        TargetGroup::Cmd,
        TargetGroup::Module,
        TargetGroup::Srvpgm,
        TargetGroup::Pgm,
        TargetGroup::Menu,
        TargetGroup::Pnlgrp,
        TargetGroup::Qmqry,
        TargetGroup::Wscst,
        TargetGroup::Msg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetGroup::Trg => "TRG",
            TargetGroup::Dta => "DTA",
            TargetGroup::Sql => "SQL",
            TargetGroup::Bndd => "BNDD",
            TargetGroup::Pf => "PF",
            TargetGroup::Lf => "LF",
            TargetGroup::Dspf => "DSPF",
            TargetGroup::Prtf => "PRTF",
            TargetGroup::Cmd => "CMD",
            TargetGroup::Module => "MODULE",
            TargetGroup::Srvpgm => "SRVPGM",
            TargetGroup::Pgm => "PGM",
            TargetGroup::Menu => "MENU",
            TargetGroup::Pnlgrp => "PNLGRP",
            TargetGroup::Qmqry => "QMQRY",
            TargetGroup::Wscst => "WSCST",
            TargetGroup::Msg => "MSG",
        }
    }

    /// Target group for a source file extension such as `PGM.RPGLE` or `sqlprc`.
    pub fn from_file_extension(extension: &str) -> Option<TargetGroup> {
        lookup(FILE_TARGET_GROUPS, extension)
    }

    /// Target group for an object type such as `SRVPGM` or `file`.
    pub fn from_object_type(object_type: &str) -> Option<TargetGroup> {
        lookup(OBJECT_TYPE_TARGET_GROUPS, object_type)
    }

    /// Classify a `Rules.mk` target identifier (`HELLO.PGM`) by its object-type suffix.
    pub fn classify_target(identifier: &str) -> Option<TargetGroup> {
        let (_, object_type) = identifier.rsplit_once('.')?;
        Self::from_object_type(object_type)
    }
}

impl fmt::Display for TargetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const FILE_TARGET_GROUPS: &[(&str, TargetGroup)] = &[
    ("PGM.SQLRPGLE", TargetGroup::Pgm),
    ("PGM.RPGLE", TargetGroup::Pgm),
    ("PGM.CLLE", TargetGroup::Pgm),
    ("PGM.C", TargetGroup::Pgm),
    ("CMDSRC", TargetGroup::Cmd),
    ("DSPF", TargetGroup::Dspf),
    ("LF", TargetGroup::Lf),
    ("PF", TargetGroup::Pf),
    ("PRTF", TargetGroup::Prtf),
    ("FILE", TargetGroup::Pf),
    ("MENUSRC", TargetGroup::Menu),
    ("C", TargetGroup::Module),
    ("RPGLE", TargetGroup::Module),
    ("CLLE", TargetGroup::Module),
    ("SQLC", TargetGroup::Module),
    ("SQLRPGLE", TargetGroup::Module),
    ("MODULE", TargetGroup::Pgm),
    ("CBL", TargetGroup::Pgm),
    ("CBLLE", TargetGroup::Pgm),
    ("RPG", TargetGroup::Pgm),
    ("ILEPGM", TargetGroup::Pgm),
    ("PNLGRPSRC", TargetGroup::Pnlgrp),
    ("SQL", TargetGroup::Qmqry),
    ("BND", TargetGroup::Srvpgm),
    ("ILESRVPGM", TargetGroup::Srvpgm),
    ("BNDDIR", TargetGroup::Bndd),
    ("DTA", TargetGroup::Dta),
    ("DTAARA", TargetGroup::Dta),
    ("SYSTRG", TargetGroup::Trg),
    ("SQLPRC", TargetGroup::Sql),
    ("TABLE", TargetGroup::Sql),
    ("VIEW", TargetGroup::Sql),
    ("SQLSEQ", TargetGroup::Sql),
    ("SQLUDF", TargetGroup::Sql),
    ("SQLTRG", TargetGroup::Sql),
    ("MSGF", TargetGroup::Msg),
    ("WSCSTSRC", TargetGroup::Wscst),
];

// DTAARA targets come from SQL sequences, so they build with the SQL group.
const OBJECT_TYPE_TARGET_GROUPS: &[(&str, TargetGroup)] = &[
    ("CMD", TargetGroup::Cmd),
    ("FILE", TargetGroup::Pf),
    ("MENU", TargetGroup::Menu),
    ("MODULE", TargetGroup::Module),
    ("PGM", TargetGroup::Pgm),
    ("PNLGRP", TargetGroup::Pnlgrp),
    ("QMQRY", TargetGroup::Qmqry),
    ("BNDD", TargetGroup::Bndd),
    ("DTA", TargetGroup::Dta),
    ("DTAARA", TargetGroup::Sql),
    ("SRVPGM", TargetGroup::Srvpgm),
    ("MSGF", TargetGroup::Msg),
    ("WSCST", TargetGroup::Wscst),
    ("TRG", TargetGroup::Trg),
];

/// Source file extension to the object type the file compiles into.
const FILE_OBJECT_TYPES: &[(&str, &str)] = &[
    ("PGM.SQLRPGLE", "PGM"),
    ("PGM.RPGLE", "PGM"),
    ("PGM.CLLE", "PGM"),
    ("PGM.C", "PGM"),
    ("CMDSRC", "CMD"),
    ("DSPF", "FILE"),
    ("LF", "FILE"),
    ("PF", "FILE"),
    ("PRTF", "FILE"),
    ("MENUSRC", "MENU"),
    ("MENU", "MENU"),
    ("C", "MODULE"),
    ("RPGLE", "MODULE"),
    ("CLLE", "MODULE"),
    ("SQLC", "MODULE"),
    ("SQLRPGLE", "MODULE"),
    ("MODULE", "PGM"),
    ("CBL", "PGM"),
    ("CBLLE", "PGM"),
    ("RPG", "PGM"),
    ("ILEPGM", "PGM"),
    ("PNLGRPSRC", "PNLGRP"),
    ("PNLGRP", "PNLGRP"),
    ("SQL", "QMQRY"),
    ("BND", "SRVPGM"),
    ("ILESRVPGM", "SRVPGM"),
    ("BNDDIR", "BNDD"),
    ("DTAARA", "DTA"),
    ("SYSTRG", "PGM"),
    ("SQLPRC", "PGM"),
    ("TABLE", "FILE"),
    ("VIEW", "FILE"),
    ("SQLSEQ", "DTAARA"),
    ("SQLUDF", "SRVPGM"),
    ("SQLTRG", "PGM"),
    ("MSGF", "MSGF"),
    ("WSCSTSRC", "WSCST"),
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| *v)
}

/// Object type a source file extension compiles into.
pub fn object_type_for_extension(extension: &str) -> Option<&'static str> {
    lookup(FILE_OBJECT_TYPES, extension)
}

/// Largest number of dot-separated parts in any known source extension.
pub fn max_extension_parts() -> usize {
    FILE_OBJECT_TYPES.iter().map(|(ext, _)| ext.split('.').count()).max().unwrap_or(1)
}

/// Derive the `Rules.mk` target name a source file builds.
///
/// The longest known extension wins, so `hello.pgm.rpgle` yields `HELLO.PGM`
/// while `hello.rpgle` yields `HELLO.MODULE`.
pub fn target_for_source(file_name: &str) -> Option<String> {
    let parts: Vec<&str> = file_name.split('.').collect();
    let longest = max_extension_parts().min(parts.len().saturating_sub(1));

    (1..=longest).rev().find_map(|ext_len| {
        let split = parts.len() - ext_len;
        let object_type = object_type_for_extension(&parts[split..].join("."))?;
        let stem = parts[..split].join(".");
        if stem.is_empty() {
            return None;
        }
        Some(format!("{}.{}", stem.to_uppercase(), object_type))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_case_insensitive() {
        assert_eq!(TargetGroup::from_file_extension("rpgle"), Some(TargetGroup::Module));
        assert_eq!(TargetGroup::from_file_extension("Pgm.Rpgle"), Some(TargetGroup::Pgm));
        assert_eq!(TargetGroup::from_file_extension("txt"), None);
    }

    #[test]
    fn sequences_build_as_sql_data_areas() {
        assert_eq!(object_type_for_extension("sqlseq"), Some("DTAARA"));
        assert_eq!(TargetGroup::from_object_type("DTAARA"), Some(TargetGroup::Sql));
    }

    #[test]
    fn classify_uses_object_suffix() {
        assert_eq!(TargetGroup::classify_target("HELLO.PGM"), Some(TargetGroup::Pgm));
        assert_eq!(TargetGroup::classify_target("UTILS.SRVPGM"), Some(TargetGroup::Srvpgm));
        assert_eq!(TargetGroup::classify_target("all"), None);
        assert_eq!(TargetGroup::classify_target("NOTES.TXT"), None);
    }

    #[test]
    fn every_group_is_reachable_from_a_table() {
        for group in TargetGroup::ALL {
            assert!(
                FILE_TARGET_GROUPS.iter().any(|(_, g)| *g == group),
                "{group} has no source extension"
            );
        }
    }

    #[test]
    fn max_extension_parts_covers_compound_extensions() {
        assert_eq!(max_extension_parts(), 2);
    }

    #[test]
    fn target_for_source_prefers_longest_extension() {
        assert_eq!(target_for_source("hello.pgm.rpgle").as_deref(), Some("HELLO.PGM"));
        assert_eq!(target_for_source("hello.rpgle").as_deref(), Some("HELLO.MODULE"));
        assert_eq!(target_for_source("cust.table").as_deref(), Some("CUST.FILE"));
        assert_eq!(target_for_source("my.util.sqlprc").as_deref(), Some("MY.UTIL.PGM"));
    }

    #[test]
    fn target_for_source_rejects_unknown_or_bare_names() {
        assert_eq!(target_for_source("README.md"), None);
        assert_eq!(target_for_source("rpgle"), None);
        assert_eq!(target_for_source(".rpgle"), None);
    }
}
