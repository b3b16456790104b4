// SPDX-License-Identifier: MPL-2.0
//! View rendering: a pure function of the controller state.

use super::{App, Message};
use crate::summary;
use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Element, Length};

pub fn view(app: &App) -> Element<'_, Message> {
    let header = column![
        text("Hourly Air Quality").size(28),
        text(format!("Backend: {}", app.base_url())).size(13),
    ]
    .spacing(4);

    let controls = row![
        text_input(
            "Filter by key (e.g., PM10, O3, station name)...",
            app.query(),
        )
        .on_input(Message::QueryChanged)
        .on_submit(Message::SearchPressed),
        button("Search").on_press(Message::SearchPressed),
        button("Fetch now").on_press(Message::RefreshPressed),
    ]
    .spacing(8);

    let mut page = column![header, controls].spacing(12).padding(16);

    if let Some(fetched) = summary::format_fetched_at(app.fetched_at()) {
        page = page.push(text(format!("Latest dataset: {}", fetched)).size(13));
    }
    if !app.error_message().is_empty() {
        page = page.push(text(app.error_message()).style(text::danger));
    }
    if app.is_loading() {
        page = page.push(text("Loading...").size(13));
    }

    let mut list = column![].spacing(4);
    for item in app.rows() {
        let value = match &item.unit {
            Some(unit) => format!("{} {}", item.value, unit),
            None => item.value.to_string(),
        };
        list = list.push(
            row![text(&item.key).width(Length::Fill), text(value)].spacing(8),
        );
    }
    page = page.push(scrollable(list).height(Length::Fill));

    container(page)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
