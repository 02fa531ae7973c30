//! Configuration validation rules.

use super::schema::Config;

/// Longest simulated delay accepted anywhere in the config
const MAX_DELAY_MS: u64 = 60_000;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.chat.title_max_chars == 0 {
        errors.push("chat.title_max_chars must be > 0".to_string());
    }
    if config.chat.attachment_stagger_ms > MAX_DELAY_MS {
        errors.push(format!(
            "chat.attachment_stagger_ms must be <= {}",
            MAX_DELAY_MS
        ));
    }
    if config.chat.reply_delay_ms > MAX_DELAY_MS {
        errors.push(format!("chat.reply_delay_ms must be <= {}", MAX_DELAY_MS));
    }
    if config.xray.analysis_delay_ms > MAX_DELAY_MS {
        errors.push(format!("xray.analysis_delay_ms must be <= {}", MAX_DELAY_MS));
    }

    let format = config.logging.format.to_lowercase();
    if format != "text" && format != "json" {
        errors.push("logging.format must be 'text' or 'json'".to_string());
    }
    if config.logging.dir.trim().is_empty() {
        errors.push("logging.dir must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}
