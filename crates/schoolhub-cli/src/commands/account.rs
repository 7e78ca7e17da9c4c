use anyhow::bail;
use dialoguer::{Input, Password};
use schoolhub_client::ApiClient;
use schoolhub_client::api::AuthApi;
use schoolhub_core::validate_form;
use schoolhub_models::{ChangePasswordRequest, LoginRequest, User};
use schoolhub_store::{FormSubmitter, SubmitError, effect_channel};

use super::{print_effects, require_session};

pub async fn login(
    client: &ApiClient,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let request = LoginRequest::new(email, password);
    if let Err(errors) = validate_form(&request) {
        bail!("Invalid login details:\n{errors}");
    }

    let session = AuthApi::login(client, &request).await?;
    println!("\n✅ Logged in successfully!");
    print_user(&session.user);
    Ok(())
}

pub async fn logout(client: &ApiClient) -> anyhow::Result<()> {
    AuthApi::logout(client).await?;
    println!("✅ Logged out");
    Ok(())
}

pub async fn whoami(client: &ApiClient, refresh: bool) -> anyhow::Result<()> {
    require_session(client)?;
    let user = if refresh {
        AuthApi::me(client).await?
    } else {
        match client.sessions().user() {
            Some(user) => user,
            None => AuthApi::me(client).await?,
        }
    };
    print_user(&user);
    Ok(())
}

pub async fn change_password(client: &ApiClient) -> anyhow::Result<()> {
    require_session(client)?;

    let current: String = Password::new().with_prompt("Current password").interact()?;
    let new: String = Password::new().with_prompt("New password").interact()?;
    let confirm: String = Password::new().with_prompt("Confirm new password").interact()?;
    let request = ChangePasswordRequest::new(current, new, confirm);

    let (effects, mut rx) = effect_channel();
    let submitter = FormSubmitter::new(client.cache().clone(), effects);
    let result = submitter
        .submit(&request, || AuthApi::change_password(client, &request))
        .await;
    print_effects(&mut rx);

    match result {
        Ok(response) => {
            println!("✅ {}", response.message);
            Ok(())
        }
        Err(SubmitError::Invalid(errors)) => bail!("Password not changed:\n{errors}"),
        Err(SubmitError::Api(e)) => bail!(e.user_message()),
    }
}

fn print_user(user: &User) {
    println!("   Name:  {}", user.name);
    println!("   Email: {}", user.email);
    println!("   Role:  {:?}", user.role);
}
