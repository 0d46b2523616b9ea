use registry_core::{
    AppViewModel, Banner, FormView, ListBody, ListView, UserRowView, EMPTY_LIST_SUBTITLE,
    EMPTY_LIST_TITLE,
};

const RULE: &str = "------------------------------------------------------------";

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    render_form(&view.form, &mut lines);
    if let Some(listing) = &view.listing {
        lines.push(String::new());
        render_listing(listing, &mut lines);
    }
    lines
}

fn render_form(form: &FormView, lines: &mut Vec<String>) {
    lines.push("User Registration".to_string());
    lines.push("Please fill in your details".to_string());
    lines.push(RULE.to_string());

    match &form.banner {
        Some(Banner::Success(message)) => lines.push(format!("✓ {message}")),
        Some(Banner::Error(message)) => lines.push(format!("✕ {message}")),
        None => {}
    }

    for field in &form.fields {
        let value = if field.value.is_empty() {
            format!("<{}>", field.placeholder)
        } else {
            field.value.clone()
        };
        lines.push(format!("  {:<14} {}", format!("{}:", field.label), value));
        if let Some(error) = &field.error {
            lines.push(format!("  {:<14} ! {}", "", error));
        }
    }

    let button = if form.submit_enabled {
        format!("[{}]", form.submit_label)
    } else {
        format!("({})", form.submit_label)
    };
    lines.push(format!("  {button}"));

    if let Some(preview) = &form.preview {
        lines.push("  Form Preview:".to_string());
        lines.push(format!("    Name: {}", preview.name));
        lines.push(format!("    Mobile: {}", preview.mobile));
        lines.push(format!("    Email: {}", preview.email));
    }
}

fn render_listing(listing: &ListView, lines: &mut Vec<String>) {
    let refresh = if listing.refresh_enabled {
        format!("[↻ {}]", listing.refresh_label)
    } else {
        format!("(↻ {})", listing.refresh_label)
    };
    lines.push(format!("Registered Users  {refresh}"));
    lines.push(RULE.to_string());

    if let Some(error) = &listing.error {
        lines.push(format!("✕ {error}"));
    }

    match &listing.body {
        ListBody::Loading => lines.push("  Loading users...".to_string()),
        ListBody::Empty => {
            lines.push(format!("  {EMPTY_LIST_TITLE}"));
            lines.push(format!("  {EMPTY_LIST_SUBTITLE}"));
        }
        ListBody::Rows { rows, total_label } => {
            lines.push(format!(
                "  {:>5}  {:<20} {:<12} {:<28} {}",
                "ID", "Name", "Mobile", "Email", "Registered At"
            ));
            lines.extend(rows.iter().map(format_row));
            lines.push(format!("  {total_label}"));
        }
    }
}

fn format_row(row: &UserRowView) -> String {
    format!(
        "  {:>5}  {:<20} {:<12} {:<28} {}",
        row.id, row.name, row.mobile, row.email, row.registered_at
    )
}
