use autoreply::{ClassifyResultVerbose, RuleScore};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, res: &ClassifyResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Classifying: \"{}\"", input), ansi::CYAN)));

    // Message summary
    println!("\n{}", palette.paint("━━━ Message ━━━", ansi::GRAY));
    println!("  Tokens: {}", palette.paint(format!("{:?}", res.details.tokens), ansi::BLUE));
    println!(
        "  Question: {}  │  Intent: {}",
        if res.details.is_question { palette.paint("yes", ansi::GREEN) } else { palette.dim("no") },
        match res.details.intent {
            Some(intent) => palette.paint(intent.label(), ansi::YELLOW),
            None => palette.dim("- (short-circuited)"),
        }
    );

    // Rule evidence
    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    match &res.details.detected_category {
        Some(category) if !category.is_empty() => {
            println!("  Detected category: {}", palette.paint(category, ansi::YELLOW));
        }
        Some(_) => println!("  Detected category: {}", palette.dim("(unlabeled)")),
        None => println!("  Detected category: {}", palette.dim("none")),
    }
    if res.details.scores.is_empty() {
        println!("  {}", palette.dim("No rules scored (short-circuit or empty rule set)"));
    } else {
        for score in &res.details.scores {
            println!("  {}", fmt_score(score, &palette));
        }
    }

    // Result
    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    match &res.reply {
        Some(reply) => {
            println!("  {}", palette.bold(palette.paint(format!("\"{}\"", reply.text), ansi::GREEN)));
            println!(
                "      {} {}  {} {}  {} {}",
                palette.dim("rule:"),
                palette.paint(&reply.rule, ansi::CYAN),
                palette.dim("│ stage:"),
                palette.paint(reply.stage.label(), ansi::BLUE),
                palette.dim("│ score:"),
                palette.paint(format!("{:.3}", reply.score), ansi::YELLOW),
            );
        }
        None => {
            println!("{}", palette.dim("  No reply"));
            println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
            println!("  • The message is below the minimum token count");
            println!("  • No question word and no trailing '?' (smart rules need one)");
            println!("  • No trigger passed the similarity threshold");
            println!("  • The channel is not in the rule set's allow-list");
            println!("\n{}", palette.dim("  Tip: Set AUTOREPLY_DEBUG_RULES=1 to see stage-by-stage traces"));
        }
    }

    // Timing
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Scan: {}  │  Detect: {}  │  Resolve: {}",
        palette.paint(format!("{:?}", res.details.total), ansi::GREEN),
        palette.paint(format!("{:?}", res.details.scan), ansi::CYAN),
        palette.paint(format!("{:?}", res.details.detect), ansi::CYAN),
        palette.dim(format!("{:?}", res.details.resolve)),
    );
    println!();
}

fn fmt_score(score: &RuleScore, palette: &ansi::Palette) -> String {
    let label = if score.category.is_empty() {
        palette.dim("(unlabeled)")
    } else {
        palette.paint(&score.category, ansi::YELLOW)
    };
    if score.skipped {
        format!("{} {} {}", palette.dim(&score.rule), label, palette.dim("excluded by pinned category"))
    } else {
        format!(
            "{} {} {} {}",
            palette.paint(&score.rule, ansi::CYAN),
            label,
            palette.paint(format!("score {:.3}", score.score), ansi::GREEN),
            palette.dim(format!("({} token match{})", score.matches, if score.matches == 1 { "" } else { "es" })),
        )
    }
}
