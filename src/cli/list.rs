use crate::{cli::Result, registered::ALL_FRAMINGS};

pub fn list(detailed: bool) -> Result<()> {
    for framing in ALL_FRAMINGS.iter() {
        match framing.short_description {
            Some(desc) if detailed => println!("Name: {}\nDescription: {}\n", framing.name, desc),
            _ => println!("{}", framing.name),
        }
    }
    Ok(())
}
