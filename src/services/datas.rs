// src/services/datas.rs
// Rótulos de datas em pt-BR para o gráfico e para o portal.
use chrono::{DateTime, Datelike, Local, NaiveDate, Weekday};

const MESES: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

pub fn dia_semana_curto(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "seg.",
        Weekday::Tue => "ter.",
        Weekday::Wed => "qua.",
        Weekday::Thu => "qui.",
        Weekday::Fri => "sex.",
        Weekday::Sat => "sáb.",
        Weekday::Sun => "dom.",
    }
}

/// Ex.: `sex. 10`.
pub fn rotulo_dia(data: NaiveDate) -> String {
    format!("{} {:02}", dia_semana_curto(data.weekday()), data.day())
}

/// Ex.: `10 de mai.`.
pub fn data_curta(data: &DateTime<Local>) -> String {
    format!("{:02} de {}", data.day(), MESES[data.month0() as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rotulos() {
        let sexta = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert_eq!(rotulo_dia(sexta), "sex. 10");

        let dt = Local.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(data_curta(&dt), "07 de mar.");
    }
}
