pub(crate) fn about_text() -> String {
    format!(
        "fintrack {}\n\
        A simple personal finance tracker. Transactions are kept in a plain CSV file \
        (date, amount, category, description) that you can open in any spreadsheet.",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_mentions_version() {
        assert!(about_text().contains(env!("CARGO_PKG_VERSION")));
    }
}
