//! Tunable limits for the scanning algorithms in [`crate::discovery`].
//!
//! `mxf_find_footer_partition` and related C routines hard-code these as
//! file-scoped constants. Exposing them as a config struct lets a caller
//! trade scan cost against tolerance for unusual files without forking the
//! discovery code.

/// Byte window read per iteration while scanning backward for the footer
/// partition pack key.
const DEFAULT_FOOTER_SCAN_WINDOW: u32 = 32768;

/// Upper bound on footer-scan iterations before giving up, i.e. how far
/// back from the end of the file the search is willing to look
/// (`footer_scan_window * footer_scan_max_iterations` bytes).
const DEFAULT_FOOTER_SCAN_MAX_ITERATIONS: u32 = 250;

/// Longest run-in [`crate::discovery::read_header_pack_kl_with_runin`] will
/// scan through before giving up on finding a header partition pack.
const DEFAULT_MAX_RUNIN_LEN: u16 = 65535;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionConfig {
    pub(crate) max_runin_len: u16,
    pub(crate) footer_scan_window: u32,
    pub(crate) footer_scan_max_iterations: u32,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            max_runin_len: DEFAULT_MAX_RUNIN_LEN,
            footer_scan_window: DEFAULT_FOOTER_SCAN_WINDOW,
            footer_scan_max_iterations: DEFAULT_FOOTER_SCAN_MAX_ITERATIONS,
        }
    }
}

impl PartitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_runin_len(mut self, max_runin_len: u16) -> Self {
        self.max_runin_len = max_runin_len;
        self
    }

    pub fn with_footer_scan_window(mut self, footer_scan_window: u32) -> Self {
        self.footer_scan_window = footer_scan_window;
        self
    }

    pub fn with_footer_scan_max_iterations(mut self, footer_scan_max_iterations: u32) -> Self {
        self.footer_scan_max_iterations = footer_scan_max_iterations;
        self
    }
}
