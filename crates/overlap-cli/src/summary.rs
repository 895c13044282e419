use console::Style;
use overlap_core::results::ResultSet;
use overlap_core::session::Session;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    selected: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            selected: Style::new().green(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

/// Print each slot's display box and the current overlap.
pub fn print_layout_summary(session: &Session) {
    let s = Styles::new();
    let store = session.store();
    let container = store.container();

    println!();
    println!("  {}", s.title.apply_to("Overlap Layout"));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Container"),
        s.value
            .apply_to(format!("{}x{}", container.width, container.height))
    );
    match store.shared_scale() {
        Some(scale) => println!(
            "  {:<14}{}",
            s.label.apply_to("Scale"),
            s.value.apply_to(format!("{scale:.4}"))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Scale"),
            s.disabled.apply_to("unset")
        ),
    }
    let config = session.config();
    let filling = if config.enforce_sequential_slot_filling {
        format!("sequential ({})", config.relock_policy)
    } else {
        "any order".to_string()
    };
    println!(
        "  {:<14}{}",
        s.label.apply_to("Filling"),
        s.value.apply_to(filling)
    );
    println!();

    for view in session.slot_views() {
        let name = format!("Slot {}", view.id);
        let bounds = store.slot(view.id).and_then(|slot| slot.bounds());
        let line = match bounds {
            Some(b) => {
                let text = format!("{b}");
                if view.selected {
                    format!("{} {}", s.selected.apply_to(text), s.selected.apply_to("*"))
                } else {
                    s.value.apply_to(text).to_string()
                }
            }
            None if view.loading => s.disabled.apply_to("loading").to_string(),
            None if view.locked => s.disabled.apply_to("locked").to_string(),
            None => s.disabled.apply_to("empty").to_string(),
        };
        println!("  {:<14}{}", s.label.apply_to(name), line);
    }

    println!();
    match session.intersection() {
        Some(rect) => println!(
            "  {:<14}{}",
            s.label.apply_to("Overlap"),
            s.selected.apply_to(rect)
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Overlap"),
            s.disabled.apply_to("none")
        ),
    }
    println!();
}

/// Print one line per slot for a result collection.
pub fn print_result_set(title: &str, set: &ResultSet) {
    let s = Styles::new();
    println!("  {}", s.title.apply_to(title));
    for (id, crop) in set.entries() {
        match crop {
            Some(c) => println!(
                "    {:<12}{}",
                s.label.apply_to(id.label()),
                s.value.apply_to(format!(
                    "{}x{} from ({}, {})",
                    c.width(),
                    c.height(),
                    c.rect.x,
                    c.rect.y
                ))
            ),
            None => println!(
                "    {:<12}{}",
                s.label.apply_to(id.label()),
                s.disabled.apply_to("-")
            ),
        }
    }
}
