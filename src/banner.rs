//! Startup banner and session summary display.

use crate::consts::{HOMEPAGE, REPO};

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub server: &'a str,
    pub storage: &'a str,
    pub location: Option<&'a str>,
    pub browser: bool,
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║          R E A L  /  F A K E          ║
   ║       call it, then move along        ║
   ╚═══════════════════════════════════════╝

   version   {}
   home      {}
   repo      {}
   server    {}
   storage   {}
   location  {}
   browser   {}
"#,
        env!("CARGO_PKG_VERSION"),
        HOMEPAGE,
        REPO,
        info.server,
        info.storage,
        info.location.unwrap_or("(none)"),
        if info.browser { "on" } else { "off" },
    );
}

/// Print the session summary.
pub fn print_session_summary(accepted: usize, location: Option<&str>) {
    if accepted > 0 {
        println!("session: {accepted} prediction(s) accepted");
    }
    if let Some(url) = location {
        println!("last location: {url}");
    }
    println!("goodbye.");
}
