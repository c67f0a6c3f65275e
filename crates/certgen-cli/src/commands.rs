use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use certgen_cli::cli::Cli;
use certgen_cli::config::CertgenConfig;
use certgen_cli::report::write_report;
use certgen_core::{DEFAULT_PASS_DELAY, PipelineSettings, Services, run_pipeline};
use certgen_google::GoogleClient;
use certgen_model::{DeliveryMode, RunReport};
use certgen_output::{Mailer, SmtpMailer};

pub fn run_certificates(cli: &Cli) -> Result<RunReport> {
    let run_config = cli.run_configuration();
    let mode = run_config.delivery_mode();
    let span = info_span!("certgen", mode = %mode);
    let _guard = span.enter();

    let config = CertgenConfig::from_env().context("load configuration")?;
    let mailer = match mode {
        DeliveryMode::EmailAndMerge => {
            let settings = config.require_mail().context("load mail configuration")?;
            Some(SmtpMailer::new(settings).context("configure SMTP mailer")?)
        }
        DeliveryMode::Archive => None,
    };

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("create output directory {}", cli.output_dir.display()))?;

    let google = GoogleClient::connect(&config.google).context("connect to Google APIs")?;
    info!("Google APIs authorized");

    let settings = PipelineSettings::new(
        config.template_id.as_str(),
        config.folder_id.as_str(),
        cli.output_dir.clone(),
    )
    .with_delays(Duration::from_millis(cli.send_delay_ms), DEFAULT_PASS_DELAY)
    .with_log_data(cli.log_data);

    let services = Services {
        sheets: &google,
        templates: &google,
        mailer: mailer.as_ref().map(|mailer| mailer as &dyn Mailer),
    };

    let report = run_pipeline(&run_config, &settings, services).context("certificate run failed")?;

    if let Some(path) = &cli.report {
        write_report(path, &report)?;
        info!(path = %path.display(), "run report written");
    }
    Ok(report)
}
