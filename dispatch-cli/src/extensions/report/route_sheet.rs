use dispatch_core::prelude::Driver;
use std::fmt::Write;

/// Formats a route sheet handed to a driver: a header with driver details and numbered stops.
pub fn format_route_sheet(driver: &Driver) -> String {
    let mut content = format!("Route Sheet: {}\n", driver.name());

    if let Some(address) = driver.address().filter(|address| !address.is_empty()) {
        let _ = writeln!(content, "Home: {address}");
    }

    let _ = writeln!(content, "Please remember to take one package for yourself\n");
    let _ = writeln!(content, "Deliveries ({}):", driver.deliveries().len());

    for (idx, delivery) in driver.deliveries().iter().enumerate() {
        let _ = match delivery.display_name() {
            Some(name) => writeln!(content, "{}. {} - {name}", idx + 1, delivery.address_for_display()),
            None => writeln!(content, "{}. {}", idx + 1, delivery.address_for_display()),
        };
    }

    content
}
