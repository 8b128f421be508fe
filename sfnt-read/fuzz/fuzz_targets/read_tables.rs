#![no_main]
use libfuzzer_sys::fuzz_target;
use sfnt_read::{types::NameId, FontFile, TableProvider};

fn do_table_things(data: &[u8]) {
    let file = FontFile::new(data);
    for font in file.fonts().iter().flatten() {
        let _ = font.head().map(|head| head.units_per_em);
        if let Ok(name) = font.name() {
            let _ = name.get(NameId::FAMILY_NAME).map(|entry| entry.string.len());
        }
        let _ = font.hhea();
        let _ = font.vhea();
        if let Ok(gsub) = font.gsub() {
            for script in &gsub.script_list.scripts {
                if let Some(lang_sys) = &script.default_lang_sys {
                    let _ = gsub.feature_tags(lang_sys).count();
                }
            }
        }
        let _ = font.gpos();
        for (_, table) in font.decode_all() {
            if let Ok(table) = table {
                let _ = table.anomalies();
            }
        }
    }
}

fuzz_target!(|data: &[u8]| {
    do_table_things(data);
});
