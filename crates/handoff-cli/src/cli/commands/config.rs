//! `handoff config` – show where the config lives and what it says.

use anyhow::Result;
use handoff_core::config;
use std::path::Path;

pub fn run_config(config_path: &Path) -> Result<()> {
    let agent = config::agent_snapshot(config_path)?;
    println!("config file: {}", config_path.display());
    if agent.is_enabled() {
        println!("agent url:   {}", agent.base_url);
        println!("agent user:  {}", agent.username);
        println!(
            "password:    {}",
            if agent.password.is_empty() { "(empty)" } else { "(set)" }
        );
    } else {
        println!("agent url:   (not configured; submissions disabled)");
    }
    println!("connect timeout: {} ms", agent.connect_timeout_ms);
    match agent.request_timeout_secs {
        Some(secs) => println!("request timeout: {secs} s"),
        None => println!("request timeout: none"),
    }
    Ok(())
}
