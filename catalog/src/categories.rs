//! Part category table.

use crate::types::PartCategory;

/// All part categories, in display order.
pub static PART_CATEGORIES: &[PartCategory] = &[
    PartCategory {
        id: "engine",
        name: "Motor ve Aksamları",
        keywords: "piston, segman, subap, eksantrik, motor kulağı, conta",
        sub_categories: &[
            "Piston Takımı", "Segman Seti", "Subap Takımı", "Eksantrik Mili",
            "Silindir Kapak Contası", "Motor Kulağı", "Yağ Pompası", "Karter",
            "Krank Kasnağı", "Triger Seti", "V Kayışı", "Turboşarj",
        ],
    },
    PartCategory {
        id: "brake",
        name: "Fren Sistemi",
        keywords: "balata, disk, kampana, fren merkezi, abs sensörü",
        sub_categories: &[
            "Ön Fren Balatası", "Arka Fren Balatası", "Ön Fren Diski", "Arka Fren Diski",
            "Fren Ana Merkezi", "Tekerlek Silindiri", "ABS Sensörü", "El Freni Teli",
            "Fren Hortumu", "Westinghouse",
        ],
    },
    PartCategory {
        id: "filter",
        name: "Filtre Grubu",
        keywords: "yağ filtresi, hava filtresi, polen filtresi, yakıt filtresi",
        sub_categories: &[
            "Yağ Filtresi", "Hava Filtresi", "Polen (Kabin) Filtresi",
            "Yakıt (Mazot/Benzin) Filtresi", "Şanzıman Filtresi", "LPG Filtresi",
        ],
    },
    PartCategory {
        id: "suspension",
        name: "Süspansiyon & Yürüyen",
        keywords: "amortisör, helezon, salıncak, rotil, rot başı",
        sub_categories: &[
            "Ön Amortisör", "Arka Amortisör", "Helezon Yayı", "Salıncak (Tablalar)", "Rotil",
            "Rot Başı", "Rot Mili", "Z Rotu", "Porya Rulmanı", "Aks Kafası", "Aks Mili",
        ],
    },
    PartCategory {
        id: "electrical",
        name: "Elektrik & Aydınlatma",
        keywords: "far, stop, akü, marş dinamosu, şarj dinamosu, buji",
        sub_categories: &[
            "Far (Sağ/Sol)", "Stop Lambası", "Sinyal Lambası", "Sis Farı", "Marş Dinamosu",
            "Şarj Dinamosu", "Ateşleme Bobini", "Buji", "Kızdırma Bujisi", "Cam Açma Düğmesi",
            "Korna", "Park Sensörü",
        ],
    },
    PartCategory {
        id: "body",
        name: "Kaporta & Karoser",
        keywords: "tampon, çamurluk, kaput, ayna, silecek",
        sub_categories: &[
            "Ön Tampon", "Arka Tampon", "Çamurluk", "Motor Kaputu", "Yan Ayna", "Kapı Kolu",
            "Silecek Süpürgesi", "Silecek Motoru", "Bagaj Amortisörü", "Panjur", "Davlumbaz",
        ],
    },
    PartCategory {
        id: "cooling",
        name: "Isıtma & Soğutma",
        keywords: "radyatör, devirdaim, termostat, fan, klima kompresörü",
        sub_categories: &[
            "Su Radyatörü", "Klima Radyatörü", "Kalorifer Radyatörü", "Devirdaim Pompası",
            "Termostat", "Radyatör Fanı", "Klima Kompresörü", "Genleşme Kabı", "Radyatör Hortumu",
        ],
    },
    PartCategory {
        id: "transmission",
        name: "Debriyaj & Şanzıman",
        keywords: "baskı balata, debriyaj seti, volan, şanzıman kulağı",
        sub_categories: &[
            "Debriyaj Seti (Baskı Balata)", "Volan (Oynar Göbek)", "Debriyaj Rulmanı",
            "Debriyaj Üst Merkezi", "Şanzıman Kulağı", "Aks Körüğü", "Vites Topuzu",
        ],
    },
];

/// Find a category by identifier.
pub fn category_by_id(id: &str) -> Option<&'static PartCategory> {
    PART_CATEGORIES.iter().find(|c| c.id == id)
}

/// Find a category by display name.
pub fn category_by_name(name: &str) -> Option<&'static PartCategory> {
    PART_CATEGORIES.iter().find(|c| c.name == name)
}
