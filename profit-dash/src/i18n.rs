//! Bundled language packs
//!
//! Three static string tables keyed by language code. Unknown codes fall
//! back to English. Switching languages swaps the table; every label is
//! re-read from it on the next paint.

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Tr,
    Sv,
}

impl Lang {
    /// Parse a language code, falling back to English for unknown codes
    pub fn from_code(code: &str) -> Self {
        match code {
            "tr" => Self::Tr,
            "sv" => Self::Sv,
            _ => Self::En,
        }
    }

    /// Code sent to the backend's language side-channel
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Tr => "tr",
            Self::Sv => "sv",
        }
    }

    /// Cycle through the bundled languages
    pub fn next(self) -> Self {
        match self {
            Self::En => Self::Tr,
            Self::Tr => Self::Sv,
            Self::Sv => Self::En,
        }
    }
}

/// Flat set of display strings for one language.
///
/// `{n}` and `{path}` placeholders are substituted at render time.
#[derive(Debug)]
pub struct Strings {
    pub app_title: &'static str,
    pub today_title: &'static str,
    pub totals_title: &'static str,
    pub records_title: &'static str,

    pub sales: &'static str,
    pub expenses: &'static str,
    pub profit: &'static str,
    pub orders: &'static str,
    pub items: &'static str,
    pub discount: &'static str,

    pub header_date: &'static str,
    pub header_type: &'static str,
    pub header_amount: &'static str,
    pub header_period: &'static str,

    pub type_sale: &'static str,
    pub type_expense: &'static str,

    pub group_daily: &'static str,
    pub group_monthly: &'static str,
    pub group_yearly: &'static str,

    pub filter_today: &'static str,
    pub filter_yesterday: &'static str,
    pub filter_this_week: &'static str,
    pub filter_last_week: &'static str,
    pub filter_this_month: &'static str,
    pub filter_last_month: &'static str,
    pub filter_all: &'static str,

    pub suffix_last_records: &'static str,
    pub suffix_last_days: &'static str,

    pub form_range_title: &'static str,
    pub form_record_title: &'static str,
    pub form_plan_title: &'static str,
    pub label_start: &'static str,
    pub label_end: &'static str,
    pub label_group: &'static str,
    pub label_date: &'static str,
    pub label_type: &'static str,
    pub label_amount: &'static str,
    pub label_plan: &'static str,

    pub hint_normal: &'static str,
    pub hint_form: &'static str,
    pub hint_alert: &'static str,

    pub alert_title: &'static str,
    pub msg_date_required: &'static str,
    pub msg_amount_invalid: &'static str,
    pub msg_start_invalid: &'static str,
    pub msg_end_invalid: &'static str,
    pub msg_record_added: &'static str,
    pub msg_export_saved: &'static str,
    pub msg_export_failed: &'static str,
    pub msg_plan_changed: &'static str,
    pub msg_no_user: &'static str,

    pub lang_name: &'static str,
}

/// Strings for the given language
pub fn strings(lang: Lang) -> &'static Strings {
    match lang {
        Lang::En => &EN,
        Lang::Tr => &TR,
        Lang::Sv => &SV,
    }
}

static EN: Strings = Strings {
    app_title: "ProfitApp",
    today_title: "Today",
    totals_title: "Totals",
    records_title: "Recent records",

    sales: "Sales",
    expenses: "Expenses",
    profit: "Profit",
    orders: "Orders",
    items: "Items",
    discount: "Discount",

    header_date: "Date",
    header_type: "Type",
    header_amount: "Amount",
    header_period: "Period",

    type_sale: "Sale",
    type_expense: "Expense",

    group_daily: "Daily",
    group_monthly: "Monthly",
    group_yearly: "Yearly",

    filter_today: "Today",
    filter_yesterday: "Yesterday",
    filter_this_week: "This week",
    filter_last_week: "Last week",
    filter_this_month: "This month",
    filter_last_month: "Last month",
    filter_all: "All",

    suffix_last_records: "(last {n})",
    suffix_last_days: "(last {n} days)",

    form_range_title: "Date range",
    form_record_title: "Add record",
    form_plan_title: "Change plan",
    label_start: "Start",
    label_end: "End",
    label_group: "Grouping",
    label_date: "Date",
    label_type: "Type",
    label_amount: "Amount",
    label_plan: "Plan",

    hint_normal: "q quit · r refresh · 1-7 filters · n range · a record · d days · e/x export · l language · p plan",
    hint_form: "Tab next field · Enter apply · Esc cancel",
    hint_alert: "Press Enter to dismiss",

    alert_title: "Error",
    msg_date_required: "Date is required.",
    msg_amount_invalid: "Amount must be a number.",
    msg_start_invalid: "Start date must be YYYY-MM-DD.",
    msg_end_invalid: "End date must be YYYY-MM-DD.",
    msg_record_added: "Record added.",
    msg_export_saved: "Export saved to {path}",
    msg_export_failed: "Export failed",
    msg_plan_changed: "Plan updated.",
    msg_no_user: "Set PROFIT_USER_ID to change plans.",

    lang_name: "English",
};

static TR: Strings = Strings {
    app_title: "ProfitApp",
    today_title: "Bugün",
    totals_title: "Toplamlar",
    records_title: "Son kayıtlar",

    sales: "Satışlar",
    expenses: "Giderler",
    profit: "Kâr",
    orders: "Siparişler",
    items: "Ürünler",
    discount: "İndirim",

    header_date: "Tarih",
    header_type: "Tür",
    header_amount: "Tutar",
    header_period: "Dönem",

    type_sale: "Satış",
    type_expense: "Gider",

    group_daily: "Günlük",
    group_monthly: "Aylık",
    group_yearly: "Yıllık",

    filter_today: "Bugün",
    filter_yesterday: "Dün",
    filter_this_week: "Bu hafta",
    filter_last_week: "Geçen hafta",
    filter_this_month: "Bu ay",
    filter_last_month: "Geçen ay",
    filter_all: "Tümü",

    suffix_last_records: "(son {n})",
    suffix_last_days: "(son {n} gün)",

    form_range_title: "Tarih aralığı",
    form_record_title: "Kayıt ekle",
    form_plan_title: "Planı değiştir",
    label_start: "Başlangıç",
    label_end: "Bitiş",
    label_group: "Gruplama",
    label_date: "Tarih",
    label_type: "Tür",
    label_amount: "Tutar",
    label_plan: "Plan",

    hint_normal: "q çıkış · r yenile · 1-7 filtre · n aralık · a kayıt · d gün · e/x dışa aktar · l dil · p plan",
    hint_form: "Tab sonraki alan · Enter uygula · Esc iptal",
    hint_alert: "Kapatmak için Enter'a basın",

    alert_title: "Hata",
    msg_date_required: "Tarih gerekli.",
    msg_amount_invalid: "Tutar bir sayı olmalı.",
    msg_start_invalid: "Başlangıç tarihi YYYY-MM-DD olmalı.",
    msg_end_invalid: "Bitiş tarihi YYYY-MM-DD olmalı.",
    msg_record_added: "Kayıt eklendi.",
    msg_export_saved: "Dışa aktarma kaydedildi: {path}",
    msg_export_failed: "Dışa aktarma başarısız",
    msg_plan_changed: "Plan güncellendi.",
    msg_no_user: "Plan değiştirmek için PROFIT_USER_ID ayarlayın.",

    lang_name: "Türkçe",
};

static SV: Strings = Strings {
    app_title: "ProfitApp",
    today_title: "Idag",
    totals_title: "Totalt",
    records_title: "Senaste poster",

    sales: "Försäljning",
    expenses: "Utgifter",
    profit: "Vinst",
    orders: "Ordrar",
    items: "Artiklar",
    discount: "Rabatt",

    header_date: "Datum",
    header_type: "Typ",
    header_amount: "Belopp",
    header_period: "Period",

    type_sale: "Försäljning",
    type_expense: "Utgift",

    group_daily: "Daglig",
    group_monthly: "Månadsvis",
    group_yearly: "Årsvis",

    filter_today: "Idag",
    filter_yesterday: "Igår",
    filter_this_week: "Denna vecka",
    filter_last_week: "Förra veckan",
    filter_this_month: "Denna månad",
    filter_last_month: "Förra månaden",
    filter_all: "Alla",

    suffix_last_records: "(senaste {n})",
    suffix_last_days: "(senaste {n} dagarna)",

    form_range_title: "Datumintervall",
    form_record_title: "Lägg till post",
    form_plan_title: "Byt plan",
    label_start: "Start",
    label_end: "Slut",
    label_group: "Gruppering",
    label_date: "Datum",
    label_type: "Typ",
    label_amount: "Belopp",
    label_plan: "Plan",

    hint_normal: "q avsluta · r uppdatera · 1-7 filter · n intervall · a post · d dagar · e/x export · l språk · p plan",
    hint_form: "Tab nästa fält · Enter verkställ · Esc avbryt",
    hint_alert: "Tryck Enter för att stänga",

    alert_title: "Fel",
    msg_date_required: "Datum krävs.",
    msg_amount_invalid: "Beloppet måste vara ett tal.",
    msg_start_invalid: "Startdatum måste vara YYYY-MM-DD.",
    msg_end_invalid: "Slutdatum måste vara YYYY-MM-DD.",
    msg_record_added: "Post tillagd.",
    msg_export_saved: "Export sparad till {path}",
    msg_export_failed: "Export misslyckades",
    msg_plan_changed: "Planen har uppdaterats.",
    msg_no_user: "Sätt PROFIT_USER_ID för att byta plan.",

    lang_name: "Svenska",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_fall_back_to_english() {
        assert_eq!(Lang::from_code("sv"), Lang::Sv);
        assert_eq!(Lang::from_code("tr"), Lang::Tr);
        assert_eq!(Lang::from_code("en"), Lang::En);
        assert_eq!(Lang::from_code("de"), Lang::En);
        assert_eq!(Lang::from_code(""), Lang::En);
    }

    #[test]
    fn cycling_visits_every_language_once() {
        let start = Lang::En;
        let mut lang = start;
        let mut seen = Vec::new();
        loop {
            seen.push(lang);
            lang = lang.next();
            if lang == start {
                break;
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn tables_differ_per_language() {
        assert_ne!(strings(Lang::En).sales, strings(Lang::Sv).sales);
        assert_ne!(strings(Lang::Tr).filter_all, strings(Lang::Sv).filter_all);
        assert_eq!(strings(Lang::Sv).lang_name, "Svenska");
    }
}
