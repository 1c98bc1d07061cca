// SPDX-License-Identifier: MPL-2.0
use glyphtune::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        document: args.opt_value_from_str("--document").unwrap(),
        renderer: args.opt_value_from_str("--renderer").unwrap(),
        sample: args.opt_value_from_str("--sample").unwrap(),
    };

    app::run(flags)
}
