//! Index name canonicalization.
//!
//! Maps a source file name to the identifier its records are indexed under.
//! Exports from the collection tooling name files after the artifact they
//! hold (`autorun.csv`, `DNS_Cache.CSV`, ...), so known artifact types are
//! recognised through an alias table and rendered in their canonical casing.
//! Anything else keeps its cleaned-up base name.

use rustc_hash::FxHashMap;

/// Known forensic artifact types, keyed by lower-cased alphanumeric alias.
pub const KNOWN_INDEXES: &[(&str, &str)] = &[
    ("autorun", "AutoRun"),
    ("connecteddevices", "ConnectedDevices"),
    ("defenderexclusions", "DefenderExclusions"),
    ("dnscache", "DNSCache"),
    ("drivers", "Drivers"),
    ("installedsoftware", "InstalledSoftware"),
    ("ipconfiguration", "IPConfiguration"),
    ("localusers", "LocalUsers"),
    ("networkshare", "NetworkShare"),
    ("officeconnection", "OfficeConnection"),
    ("opentcpconnection", "OpenTCPConnection"),
    ("powershellhistory", "PowerShellHistory"),
    ("process", "Process"),
    ("remotelyopenedfiles", "RemotelyOpenedFiles"),
    ("runningservices", "RunningServices"),
    ("scheduledtasks", "ScheduledTasks"),
    ("scheduledtasksruninfo", "ScheduledTasksRunInfo"),
    ("securityevents", "SecurityEvents"),
    ("shadowcopy", "ShadowCopy"),
    ("smbshares", "SMBShares"),
    ("win32regrunkey", "Win32RegRunKey"),
];

const EXTENSION: &str = ".csv";

/// Converts file names into canonical index identifiers.
///
/// # Examples
///
/// ```
/// use casefile_core::analyzer::IndexNameNormalizer;
///
/// let normalizer = IndexNameNormalizer::default();
/// assert_eq!(normalizer.normalize("dns_cache.CSV"), "DNSCache");
/// assert_eq!(normalizer.normalize("My Export (2).csv"), "MyExport2");
/// ```
#[derive(Debug, Clone)]
pub struct IndexNameNormalizer {
    aliases: FxHashMap<String, String>,
}

impl Default for IndexNameNormalizer {
    fn default() -> Self {
        Self::with_aliases(KNOWN_INDEXES.iter().copied())
    }
}

impl IndexNameNormalizer {
    /// Creates a normalizer with the built-in artifact aliases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer from an explicit `(alias, canonical)` table.
    ///
    /// Aliases are matched after stripping and lower-casing, so they should
    /// be given in that form; they are folded here regardless.
    pub fn with_aliases<'a>(aliases: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let aliases = aliases
            .into_iter()
            .map(|(alias, canonical)| {
                (strip_base(alias).to_ascii_lowercase(), canonical.to_owned())
            })
            .collect();
        Self { aliases }
    }

    /// Adds (or overrides) one alias.
    pub fn insert_alias(&mut self, alias: &str, canonical: &str) {
        self.aliases
            .insert(strip_base(alias).to_ascii_lowercase(), canonical.to_owned());
    }

    /// Returns the number of known aliases.
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Returns the canonical index identifier for `file_name`.
    ///
    /// A trailing `.csv` (any casing) is dropped, then everything that is not
    /// an ASCII letter or digit. If the lower-cased result is a known alias
    /// its canonical casing is returned, otherwise the stripped name as is.
    /// The result may be empty (e.g. for `".csv"`).
    pub fn normalize(&self, file_name: &str) -> String {
        let base = strip_base(strip_extension(file_name));
        match self.aliases.get(&base.to_ascii_lowercase()) {
            Some(canonical) => canonical.clone(),
            None => base,
        }
    }
}

fn strip_extension(file_name: &str) -> &str {
    let split = file_name.len().saturating_sub(EXTENSION.len());
    match (file_name.get(..split), file_name.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(EXTENSION) => stem,
        _ => file_name,
    }
}

fn strip_base(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).collect()
}
