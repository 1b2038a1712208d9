//! Small driver exercising every option kind, used by the workspace
//! integration tests and handy for poking at the parser by hand.

use getopt::GetOpt;

fn register(opts: &mut GetOpt) -> getopt::Result<()> {
    opts.help_intro("Demo driver for the getopt crate.");
    opts.help_outro("Values are echoed to standard output.");

    opts.add_flag("flag", Some('f'), "A plain flag.", || {
        println!("flag");
        Ok(())
    })?;
    opts.add_flag("verbose", Some('v'), "Another flag, groupable with -f.", || {
        println!("verbose");
        Ok(())
    })?;
    opts.add_required("required", Some('r'), "Takes exactly one value.", |v| {
        println!("required={}", v.unwrap_or(""));
        Ok(())
    })?;
    opts.add_optional("optional", Some('o'), "Takes zero or one value.", |v| {
        match v {
            Some(v) => println!("optional={v}"),
            None => println!("optional"),
        }
        Ok(())
    })?;
    opts.add_default(
        "default",
        Some('d'),
        "Takes zero or one value, falling back to a default.",
        "fallback",
        |v| {
            println!("default={}", v.unwrap_or(""));
            Ok(())
        },
    )?;
    opts.add_multi("multi", Some('m'), "Takes one quoted, space-separated list.", |vs| {
        println!("multi={}", vs.join(","));
        Ok(())
    })?;
    opts.add_raw("input", "Input file; extra positionals land here too.", |v| {
        println!("input={}", v.unwrap_or(""));
        Ok(())
    });
    Ok(())
}

fn main() {
    let mut opts = GetOpt::new();
    if register(&mut opts).is_err() {
        std::process::exit(2);
    }
    if opts.parse_env().is_err() {
        std::process::exit(1);
    }
}
