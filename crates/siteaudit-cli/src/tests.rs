use super::*;

#[test]
fn parses_classify_command() {
    let cli = Cli::try_parse_from([
        "siteaudit",
        "classify",
        "--domain",
        "example.co.uk",
        "--html",
        "page.html",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Classify { ref domain, ref html }
            if domain == "example.co.uk" && html == Path::new("page.html")
    ));
}

#[test]
fn parses_brand_command() {
    let cli = Cli::try_parse_from(["siteaudit", "brand", "--domain", "acme.com", "--html", "-"])
        .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::Brand { ref html, .. } if html == Path::new("-")));
}

#[test]
fn audit_defaults_to_online_without_country_override() {
    let cli = Cli::try_parse_from([
        "siteaudit",
        "audit",
        "--domain",
        "acme.com",
        "--html",
        "page.html",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Audit {
            country: None,
            offline: false,
            ..
        }
    ));
}

#[test]
fn audit_accepts_country_and_offline() {
    let cli = Cli::try_parse_from([
        "siteaudit",
        "audit",
        "--domain",
        "acme.com",
        "--html",
        "page.html",
        "--country",
        "US",
        "--offline",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Audit { ref country, offline: true, .. } if country.as_deref() == Some("US")
    ));
}

#[test]
fn domain_is_required() {
    assert!(Cli::try_parse_from(["siteaudit", "classify", "--html", "page.html"]).is_err());
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["siteaudit"]).is_err());
}

#[test]
fn missing_html_file_is_reported() {
    let err = read_html(Path::new("/nonexistent/siteaudit/page.html")).expect_err("should fail");
    assert!(err.to_string().contains("failed to read"));
}
