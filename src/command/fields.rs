use crate::sensors::FIELD_TYPES;

pub fn fields() -> anyhow::Result<()> {
    println!("resource\tlabel\tunit\ticon\tjson_key");
    for ft in FIELD_TYPES.iter() {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            ft.name, ft.label, ft.unit, ft.icon, ft.json_key
        );
    }
    Ok(())
}
