// src/services/dashboard.rs
use crate::{models::noticia::EstatisticaDia, services::datas};

/// Uma barra do gráfico "Notícias inseridas (últimos 7 dias)".
#[derive(Debug, Clone, PartialEq)]
pub struct BarraGrafico {
    pub rotulo: String,
    pub total: u32,
    /// Altura relativa à maior barra, 0–100.
    pub altura_pct: u32,
}

/// Ordena do dia mais antigo para o mais recente e calcula as alturas.
/// Dias ilegíveis ficam no início, com o texto original como rótulo.
pub fn montar_grafico(mut estatisticas: Vec<EstatisticaDia>) -> Vec<BarraGrafico> {
    estatisticas.sort_by_key(|e| e.data());
    let maximo = estatisticas.iter().map(|e| e.total).max().unwrap_or(0);

    estatisticas
        .into_iter()
        .map(|e| BarraGrafico {
            rotulo: e.data().map(datas::rotulo_dia).unwrap_or_else(|| e.dia.clone()),
            total: e.total,
            altura_pct: if maximo == 0 { 0 } else { e.total * 100 / maximo },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dia(dia: &str, total: u32) -> EstatisticaDia {
        EstatisticaDia { dia: dia.to_string(), total }
    }

    #[test]
    fn sorts_chronologically_and_scales() {
        let barras = montar_grafico(vec![dia("2024-05-10", 2), dia("2024-05-08", 4), dia("2024-05-09", 0)]);
        let rotulos: Vec<&str> = barras.iter().map(|b| b.rotulo.as_str()).collect();
        assert_eq!(rotulos, vec!["qua. 08", "qui. 09", "sex. 10"]);
        assert_eq!(barras.iter().map(|b| b.altura_pct).collect::<Vec<_>>(), vec![100, 0, 50]);
    }

    #[test]
    fn all_zero_has_flat_bars() {
        let barras = montar_grafico(vec![dia("2024-05-10", 0)]);
        assert_eq!(barras[0].altura_pct, 0);
        assert!(montar_grafico(vec![]).is_empty());
    }
}
