use dispatch_core::prelude::Driver;
use std::fmt::Write;

/// Formats the summary file content: every driver with the amount and addresses of deliveries.
pub fn format_assignment_summary(drivers: &[Driver]) -> String {
    let mut content = String::from("Driver Assignment Summary\n\n");

    for driver in drivers {
        let _ = writeln!(content, "{} ({} deliveries)", driver.name(), driver.deliveries().len());

        for (idx, delivery) in driver.deliveries().iter().enumerate() {
            let _ = writeln!(content, "  {}. {}", idx + 1, delivery.address());
        }

        content.push('\n');
    }

    content
}

/// Formats assignment results to be printed on console.
pub fn format_console_summary(drivers: &[Driver]) -> String {
    let mut content = String::from("Delivery assignment results:\n\n");

    for driver in drivers {
        let location = if driver.has_location() { "" } else { ", location unknown" };
        let _ = writeln!(content, "{} [{}] ({} deliveries{location})", driver.name(), driver.id(), driver.deliveries().len());

        for delivery in driver.deliveries() {
            let _ = writeln!(content, "  - {} {} ({})", delivery.id(), delivery.address_for_display(), delivery.name());
        }

        content.push('\n');
    }

    content
}
