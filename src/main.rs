use flixlog_shipping::{
    config::{self, Config},
    error::{Error, Result},
    formula::{self, Bindings, DecimalSeparators},
    package::Package,
    shipping::ShippingMethod,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = r#"Использование:
  flixlog-shipping <package.json>            расчёт вариантов доставки для корзины
  flixlog-shipping eval "<формула>" <cost> <qty>  вычисление формулы стоимости"#;

/// Обработка сигнала завершения (Ctrl+C или SIGINT/SIGTERM)
async fn shutdown_signal() {
    #[cfg(windows)]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let (Ok(mut sigint), Ok(mut sigterm)) = (
            signal(SignalKind::interrupt()),
            signal(SignalKind::terminate()),
        ) else {
            // Без обработчиков сигналов расчёт просто не отменяется
            return std::future::pending().await;
        };

        tokio::select! {
            _ = sigint.recv() => {},
            _ = sigterm.recv() => {},
        }
    }

    println!("Завершение по сигналу...");
}

/// Инициализация конфигурации
fn startup() -> Result<&'static Config> {
    // Если конфигурация не инициализирована — создаём файл и открываем его
    if config::init_if_not()? {
        let full_config_path = std::env::current_dir()?.join(config::CONFIG_PATH);
        println!(
            "Файл конфигурации инициализирован по пути: {:?}",
            full_config_path
        );
        let _ = open::that_in_background(full_config_path);
    }

    let cfg = config::get()?;

    if cfg.shipping.origin_postcode.is_empty() || cfg.shipping.access_token.is_empty() {
        println!("Предупреждение: не указан индекс склада или токен доступа Flixlog");
    }

    Ok(cfg)
}

/// Расчёт вариантов доставки для корзины из JSON-файла
async fn quote(package_path: &str) -> Result<()> {
    let cfg = startup()?;
    let package: Package = serde_json::from_str(&std::fs::read_to_string(package_path)?)?;
    let method = ShippingMethod::from_config(cfg)?;

    if cfg.launch_options.verbose {
        println!("{}: {:#?}", method.title(), package);
    }

    let options = method.calculate_until(&package, shutdown_signal()).await;

    if options.is_empty() {
        println!("Способ доставки {} недоступен для этого адреса", method.title());
    }

    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

/// Вычисление формулы с разделителями из конфигурации, если она есть
fn eval(expression: &str, cost: &str, qty: &str) -> Result<()> {
    let parse = |name: &str, value: &str| {
        value
            .parse::<f64>()
            .map_err(|_| Error::Custom(format!("{name}: ожидается число, получено {value:?}")))
    };
    let bindings = Bindings {
        cost: parse("cost", cost)?,
        qty: parse("qty", qty)?,
    };

    let separators = config::load(config::CONFIG_PATH)
        .map(|cfg| DecimalSeparators::new(cfg.locale.decimal_separators))
        .unwrap_or_default();

    println!("{}", formula::evaluate(expression, bindings, &separators)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [command, expression, cost, qty] if command == "eval" => eval(expression, cost, qty),
        [package_path] => quote(package_path).await,
        _ => Err(Error::Custom(USAGE.to_string())),
    }
}
