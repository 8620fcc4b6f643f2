// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::io::Write;
use std::thread;
use std::time::Duration;
use tracing::info;

use crate::countdown::{ReservationCountdown, release, reserve};
use crate::desk::Desk;
use crate::models::StatusKind;
use crate::utils::{fmt_vnd, pretty_table};

pub fn handle(desk: &Desk, m: &clap::ArgMatches) -> Result<()> {
    let id = m.get_one::<String>("id").unwrap();
    let customer_id = m.get_one::<String>("customer").unwrap();
    let ticks = *m.get_one::<u64>("ticks").unwrap_or(&0);
    let watch = m.get_one::<u64>("watch").copied();

    let hold_secs = desk.settings.reservation.hold_secs()?;
    let property = desk.data.property(id)?;
    let customer = desk.data.customer(customer_id)?;
    let reservation = reserve(
        property,
        &customer.id,
        Some(&customer.name),
        desk.now,
        hold_secs,
        desk.settings.reservation.deposit_rate,
    )?;
    info!(property = %id, customer = %customer_id, "reservation placed");

    let p = &reservation.property;
    let rows = vec![
        vec![
            "Plot".into(),
            format!(
                "{} - {}",
                p.plot_number,
                p.project_name.as_deref().unwrap_or("-")
            ),
        ],
        vec!["Block".into(), p.block.clone()],
        vec!["Area".into(), format!("{} m²", p.area)],
        vec!["Price".into(), fmt_vnd(&p.price)],
        vec!["Reserved for".into(), customer.name.clone()],
        vec![
            format!("Deposit ({}%)", desk.settings.reservation.deposit_rate.normalize()),
            fmt_vnd(&reservation.deposit_due),
        ],
        vec![
            "Hold until".into(),
            reservation.hold_until.format("%Y-%m-%d %H:%M UTC").to_string(),
        ],
    ];
    println!("{}", pretty_table(&["Reserve Property", ""], rows));

    let mut countdown = ReservationCountdown::new(hold_secs);
    countdown.open();
    countdown.advance(ticks);

    match watch {
        Some(secs) => {
            let mut out = std::io::stdout();
            for _ in 0..secs {
                if countdown.expired() {
                    break;
                }
                write!(out, "\rReservation period: {}", countdown.display())?;
                out.flush()?;
                thread::sleep(Duration::from_secs(1));
                countdown.tick();
            }
            writeln!(out, "\rReservation period: {}", countdown.display())?;
        }
        None => println!("Reservation period: {}", countdown.display()),
    }
    countdown.close();

    if countdown.expired() {
        let freed = release(p);
        println!(
            "Hold expired, {} is back to {}",
            freed.plot_number,
            freed.status.label()
        );
    }
    Ok(())
}
